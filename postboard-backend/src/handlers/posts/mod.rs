pub mod bulk_process;
pub mod create;
pub mod get;
pub mod list;
pub mod serializer;

pub use bulk_process::bulk_process;
pub use create::create;
pub use get::get;
pub use list::list;
