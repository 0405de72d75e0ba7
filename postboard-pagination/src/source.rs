//! Record sources the paginator reads from.

use std::convert::Infallible;

use async_trait::async_trait;

/// A record with a unique, strictly increasing, immutable integer id.
pub trait Identified {
    fn id(&self) -> i64;
}

impl Identified for i64 {
    #[inline]
    fn id(&self) -> i64 {
        *self
    }
}

impl<T: Identified + ?Sized> Identified for &T {
    #[inline]
    fn id(&self) -> i64 {
        (**self).id()
    }
}

/// An id-ordered collection that can serve bounded `id > after` reads.
///
/// Implementations must return records in ascending id order and at most
/// `limit` of them. Errors are handed back to the caller of
/// [`paginate`](crate::paginate) untouched.
#[async_trait]
pub trait CursorSource: Send + Sync {
    type Record: Identified + Send;
    type Error: Send;

    /// Fetch up to `limit` records whose id is strictly greater than `after`,
    /// or from the beginning when `after` is `None`.
    async fn fetch_after(
        &self,
        after: Option<i64>,
        limit: usize,
    ) -> Result<Vec<Self::Record>, Self::Error>;
}

/// In-memory source. The vector must already be sorted by ascending id.
#[async_trait]
impl<R> CursorSource for Vec<R>
where
    R: Identified + Clone + Send + Sync,
{
    type Record = R;
    type Error = Infallible;

    async fn fetch_after(&self, after: Option<i64>, limit: usize) -> Result<Vec<R>, Infallible> {
        let start = match after {
            Some(cursor) => self.partition_point(|record| record.id() <= cursor),
            None => 0,
        };
        Ok(self[start..].iter().take(limit).cloned().collect())
    }
}
