use futures::future;
use futures::stream::{self, Stream, StreamExt};

enum Latest<A, B> {
    Left(A),
    Right(B),
}

/// Pair the most recent value of each side whenever either side emits
///
/// Nothing is emitted until both sides have produced a value. Ends when both
/// sides have ended.
pub(crate) fn combine_latest<A, B, SA, SB>(a: SA, b: SB) -> impl Stream<Item = (A, B)>
where
    A: Clone,
    B: Clone,
    SA: Stream<Item = A>,
    SB: Stream<Item = B>,
{
    stream::select(a.map(Latest::Left), b.map(Latest::Right))
        .scan((None, None), |latest: &mut (Option<A>, Option<B>), event| {
            match event {
                Latest::Left(a) => latest.0 = Some(a),
                Latest::Right(b) => latest.1 = Some(b),
            }
            let pair = match latest {
                (Some(a), Some(b)) => Some((a.clone(), b.clone())),
                _ => None,
            };
            future::ready(Some(pair))
        })
        .filter_map(future::ready)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_waits_for_both_sides() {
        let pairs: Vec<(i32, char)> = combine_latest(stream::iter(vec![1, 2]), stream::empty())
            .collect()
            .await;
        assert!(pairs.is_empty());
    }

    #[tokio::test]
    async fn test_pairs_with_latest() {
        let pairs: Vec<(i32, char)> =
            combine_latest(stream::iter(vec![1, 2, 3]), stream::iter(vec!['a']))
                .collect()
                .await;

        assert!(!pairs.is_empty());
        assert!(pairs.iter().all(|(_, c)| *c == 'a'));
        assert_eq!(pairs.last(), Some(&(3, 'a')));
    }
}
