use flowline::{PipelineError, Stream};

#[test]
fn test_filter_keeps_order() {
    let collected = Stream::from_vec((1..=10).collect::<Vec<i32>>())
        .filter(|n| n % 2 == 0)
        .collect()
        .expect("collect failed");
    assert_eq!(collected, vec![2, 4, 6, 8, 10]);
}

#[test]
fn test_map_preserves_length_and_order() {
    let source: Vec<i64> = (0..100).collect();
    let expected: Vec<i64> = source.iter().map(|n| n * n).collect();

    let collected = Stream::from_vec(source)
        .map(|n| n * n)
        .collect()
        .expect("collect failed");
    assert_eq!(collected, expected);
}

#[test]
fn test_flat_map_expands_in_order() {
    let collected = Stream::from_vec(vec![1, 2, 3])
        .flat_map(|n| (0..n).map(|_| n).collect())
        .collect()
        .expect("collect failed");
    assert_eq!(collected, vec![1, 2, 2, 3, 3, 3]);
}

#[test]
fn test_flat_map_can_drop_elements() {
    let collected = Stream::from_vec(vec![1, 2, 3, 4])
        .flat_map(|n| if n % 2 == 0 { vec![n] } else { vec![] })
        .collect()
        .expect("collect failed");
    assert_eq!(collected, vec![2, 4]);
}

#[test]
fn test_limit_takes_prefix() {
    let collected = Stream::from_vec((1..=10).collect::<Vec<i32>>())
        .limit(3)
        .collect()
        .expect("collect failed");
    assert_eq!(collected, vec![1, 2, 3]);
}

#[test]
fn test_limit_beyond_length_is_noop() {
    let collected = Stream::from_vec(vec![1, 2, 3])
        .limit(99)
        .collect()
        .expect("collect failed");
    assert_eq!(collected, vec![1, 2, 3]);
}

#[test]
fn test_limit_zero_is_empty() {
    let collected = Stream::from_vec(vec![1, 2, 3])
        .limit(0)
        .collect()
        .expect("collect failed");
    assert!(collected.is_empty());
}

#[test]
fn test_limit_cancels_large_upstream() {
    // The source never finishes sending 1M elements; the limit stage must
    // cut it off instead of deadlocking or leaking the producer thread.
    let collected = Stream::from_vec((0..1_000_000).collect::<Vec<u32>>())
        .map(|n| n + 1)
        .limit(5)
        .collect()
        .expect("collect failed");
    assert_eq!(collected, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_parallel_is_permutation() {
    let source: Vec<u32> = (0..500).collect();
    let mut collected = Stream::from_vec(source.clone())
        .parallel(4)
        .expect("parallel failed")
        .collect()
        .expect("collect failed");

    assert_eq!(collected.len(), source.len());
    collected.sort_unstable();
    assert_eq!(collected, source);
}

#[test]
fn test_parallel_single_worker_preserves_order() {
    let source: Vec<u32> = (0..100).collect();
    let collected = Stream::from_vec(source.clone())
        .parallel(1)
        .expect("parallel failed")
        .collect()
        .expect("collect failed");
    assert_eq!(collected, source);
}

#[test]
fn test_parallel_more_workers_than_elements() {
    let mut collected = Stream::from_vec(vec![1, 2, 3])
        .parallel(16)
        .expect("parallel failed")
        .collect()
        .expect("collect failed");
    collected.sort_unstable();
    assert_eq!(collected, vec![1, 2, 3]);
}

#[test]
fn test_parallel_zero_workers_is_error() {
    let result = Stream::from_vec(vec![1, 2, 3]).parallel(0);
    assert!(matches!(result, Err(PipelineError::NoWorkers)));
}

#[test]
fn test_reduce_is_left_fold() {
    let total = Stream::from_vec((1..=10).collect::<Vec<i32>>())
        .reduce(0, |acc, n| acc + n)
        .expect("reduce failed");
    assert_eq!(total, 55);
}

#[test]
fn test_reduce_after_stages() {
    // Sum of doubled evens from 1..=10: (2+4+6+8+10) * 2 = 60.
    let total = Stream::from_vec((1..=10).collect::<Vec<i32>>())
        .filter(|n| n % 2 == 0)
        .map(|n| n * 2)
        .reduce(0, |acc, n| acc + n)
        .expect("reduce failed");
    assert_eq!(total, 60);
}

#[test]
fn test_reduce_empty_source_yields_initial() {
    let total = Stream::from_vec(Vec::<i32>::new())
        .reduce(42, |acc, n| acc + n)
        .expect("reduce failed");
    assert_eq!(total, 42);
}

#[test]
fn test_empty_source_through_stages() {
    let collected = Stream::from_vec(Vec::<i32>::new())
        .filter(|_| true)
        .map(|n| n)
        .collect()
        .expect("collect failed");
    assert!(collected.is_empty());
}

#[test]
fn test_always_true_filter_is_noop() {
    let source = vec![5, 3, 8, 1];
    let collected = Stream::from_vec(source.clone())
        .filter(|_| true)
        .collect()
        .expect("collect failed");
    assert_eq!(collected, source);
}

#[test]
fn test_panicking_map_surfaces_error() {
    let result = Stream::from_vec(vec![1, 2, 3])
        .map(|n| {
            if n == 2 {
                panic!("boom");
            }
            n
        })
        .collect();

    match result {
        Err(PipelineError::StagePanicked { stage }) => assert_eq!(stage, "map"),
        other => panic!("expected StagePanicked, got {other:?}"),
    }
}

#[test]
fn test_panic_mid_chain_does_not_hang_terminal() {
    // Downstream of the panicked stage sees a closed channel; the terminal
    // must still join everything and report the panic.
    let result = Stream::from_vec((0..100).collect::<Vec<i32>>())
        .map(|n| {
            if n == 50 {
                panic!("halfway");
            }
            n
        })
        .filter(|n| n % 2 == 0)
        .reduce(0, |acc, n| acc + n);
    assert!(matches!(result, Err(PipelineError::StagePanicked { .. })));
}

#[test]
fn test_stats_count_forwarded_and_discarded() {
    let stream = Stream::from_vec((1..=10).collect::<Vec<i32>>()).filter(|n| n % 2 == 0);
    let stats = stream.stats();

    let collected = stream.collect().expect("collect failed");
    assert_eq!(collected.len(), 5);

    let snapshots = stats.snapshot();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].name, "source");
    assert_eq!(snapshots[0].forwarded, 10);
    assert_eq!(snapshots[1].name, "filter");
    assert_eq!(snapshots[1].forwarded, 5);
    assert_eq!(snapshots[1].discarded, 5);
}

#[test]
fn test_long_chain_end_to_end() {
    let collected = Stream::from_vec((1..=20).collect::<Vec<i32>>())
        .filter(|n| n % 2 == 0)
        .map(|n| n + 1)
        .flat_map(|n| vec![n, n])
        .limit(6)
        .collect()
        .expect("collect failed");
    assert_eq!(collected, vec![3, 3, 5, 5, 7, 7]);
}
