//! Lazy page-by-page traversal of an [`ActivitySource`].

use futures_util::{Stream, StreamExt, stream};

use crate::{ActivityRecord, ActivitySource, StravaError};

/// Page size used when the caller doesn't pick one (Strava's maximum).
pub const DEFAULT_PER_PAGE: u32 = 200;

/// Stream of activity pages starting at page 1.
///
/// A page is only requested once the previous one has been yielded. The
/// stream ends at the first empty page, or right after yielding an error.
pub fn activity_pages<S>(
    source: &S,
    per_page: u32,
) -> impl Stream<Item = Result<Vec<ActivityRecord>, StravaError>> + '_
where
    S: ActivitySource + ?Sized,
{
    stream::unfold(Some(1u32), move |next| async move {
        let page = next?;
        match source.list_activities_page(page, per_page).await {
            Ok(batch) if batch.is_empty() => {
                tracing::debug!(page, "empty page, no more activities");
                None
            }
            Ok(batch) => {
                tracing::debug!(page, received = batch.len(), "received activity page");
                if let Some(first) = batch.first() {
                    tracing::trace!(sample = ?first, "first activity on page");
                }
                Some((Ok(batch), page.checked_add(1)))
            }
            Err(e) => {
                tracing::debug!(page, error = %e, "activity page failed");
                Some((Err(e), None))
            }
        }
    })
}

/// Drain every page into one list, stopping at the first error.
pub async fn fetch_all_activities<S>(
    source: &S,
    per_page: u32,
) -> Result<Vec<ActivityRecord>, StravaError>
where
    S: ActivitySource + ?Sized,
{
    let mut pages = std::pin::pin!(activity_pages(source, per_page));
    let mut all = Vec::new();
    while let Some(batch) = pages.next().await {
        all.extend(batch?);
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedSource {
        pages: Vec<Result<Vec<ActivityRecord>, u16>>,
        requested: Mutex<Vec<(u32, u32)>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<Vec<ActivityRecord>, u16>>) -> Self {
            Self {
                pages,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ActivitySource for ScriptedSource {
        async fn list_activities_page(
            &self,
            page: u32,
            per_page: u32,
        ) -> Result<Vec<ActivityRecord>, StravaError> {
            self.requested.lock().unwrap().push((page, per_page));
            match self.pages.get(page as usize - 1) {
                Some(Ok(batch)) => Ok(batch.clone()),
                Some(Err(status)) => Err(StravaError::from_status(*status, "failed".into())),
                None => Ok(Vec::new()),
            }
        }
    }

    fn named(name: &str) -> ActivityRecord {
        ActivityRecord {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn fetch_all_stops_at_empty_page() {
        let source = ScriptedSource::new(vec![
            Ok(vec![named("a"), named("b")]),
            Ok(vec![named("c")]),
            Ok(vec![]),
            Ok(vec![named("never")]),
        ]);
        let all = fetch_all_activities(&source, 2).await.expect("fetch");
        let names: Vec<_> = all.iter().filter_map(|a| a.name.as_deref()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(*source.requested.lock().unwrap(), [(1, 2), (2, 2), (3, 2)]);
    }

    #[tokio::test]
    async fn fetch_all_propagates_first_error() {
        let source = ScriptedSource::new(vec![Ok(vec![named("a")]), Err(500), Ok(vec![named("b")])]);
        let err = fetch_all_activities(&source, 10).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(source.requested.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn pages_are_requested_lazily() {
        let source = ScriptedSource::new(vec![Ok(vec![named("a")]), Ok(vec![named("b")])]);
        let mut pages = std::pin::pin!(activity_pages(&source, 1));
        let first = pages.next().await.expect("page").expect("ok");
        assert_eq!(first.len(), 1);
        assert_eq!(source.requested.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_first_page_yields_nothing() {
        let source = ScriptedSource::new(vec![]);
        let all = fetch_all_activities(&source, DEFAULT_PER_PAGE).await.expect("fetch");
        assert!(all.is_empty());
    }
}
