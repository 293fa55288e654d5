use approx::assert_relative_eq;
use ndview_core::ops::view::normalize_axis;
use ndview_core::{
    idx, read, AxisKey, CpuRuntime, IndexKey, Indexer, IndexerOptions, NdViewError, RangeKey,
    TensorMeta,
};
use rand::Rng;

mod common;
use common::{create_test_tensor, values};

#[test]
fn test_scalar_read_drops_axis() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let t = create_test_tensor(&[4, 5]);
    for i in 0..4 {
        let row = read(&rt, &t, &IndexKey::Scalar(i))?;
        assert_eq!(row.shape(), vec![5]);
        assert_relative_eq!(values(&row)[0], (i * 5) as f64);
    }
    Ok(())
}

#[test]
fn test_negative_index_reads_from_the_end() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let t = create_test_tensor(&[4, 5]);
    let last = read(&rt, &t, &IndexKey::Scalar(-1))?;
    let third = read(&rt, &t, &IndexKey::Scalar(3))?;
    assert_eq!(values(&last), values(&third));
    Ok(())
}

#[test]
fn test_negative_indices_match_positive_on_random_shapes() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let rows = rng.gen_range(1..6usize);
        let cols = rng.gen_range(1..6usize);
        let t = create_test_tensor(&[rows, cols]);
        let r = rng.gen_range(0..rows) as isize;
        let c = rng.gen_range(0..cols) as isize;

        let positive = read(&rt, &t, &idx![r, c])?;
        let negative = read(&rt, &t, &idx![r - rows as isize, c - cols as isize])?;
        assert_eq!(positive.shape(), vec![1]);
        assert_relative_eq!(positive.as_scalar()?, negative.as_scalar()?);
        assert_relative_eq!(positive.as_scalar()?, (r as usize * cols + c as usize) as f64);
    }
    Ok(())
}

#[test]
fn test_range_counts() -> Result<(), NdViewError> {
    let forward = normalize_axis(&AxisKey::Range(RangeKey::new(1, 4)), 0, 5)?;
    assert_eq!(forward.len(), 3);

    let backward = normalize_axis(&AxisKey::Range(RangeKey::new(4, 1).with_step(-1)), 0, 5)?;
    assert_eq!(backward.len(), 3);
    let positions: Vec<usize> = (0..backward.len()).map(|i| backward.position(i)).collect();
    assert_eq!(positions, vec![4, 3, 2]);
    Ok(())
}

#[test]
fn test_zero_step_fails() {
    let rt = CpuRuntime::new();
    let t = create_test_tensor(&[4, 5]);
    for key in [
        RangeKey::full().with_step(0),
        RangeKey::new(0, 3).with_step(0),
        RangeKey::new(3, 0).with_step(0),
    ] {
        let result = read(&rt, &t, &idx![.., key]);
        assert_eq!(result.err(), Some(NdViewError::InvalidStep { axis: 1 }));
    }
}

#[test]
fn test_out_of_range_index_fails() {
    let rt = CpuRuntime::new();
    let t = create_test_tensor(&[4, 5]);
    let result = read(&rt, &t, &IndexKey::Scalar(10));
    assert!(matches!(result, Err(NdViewError::IndexOutOfRange { .. })));
    let result = read(&rt, &t, &IndexKey::Scalar(-5));
    assert!(matches!(result, Err(NdViewError::IndexOutOfRange { .. })));
}

#[test]
fn test_index_list_longer_than_rank_fails() {
    let rt = CpuRuntime::new();
    let t = create_test_tensor(&[4, 5]);
    let result = read(&rt, &t, &idx![0, 1, 2]);
    assert!(matches!(
        result,
        Err(NdViewError::DimensionOverflow { index_len: 3, rank: 2 })
    ));
}

#[test]
fn test_all_scalar_list_never_yields_empty_shape() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let t = create_test_tensor(&[4, 5]);
    let element = read(&rt, &t, &idx![1, 2])?;
    assert_eq!(element.shape(), vec![1]);
    assert_relative_eq!(element.as_scalar()?, 7.0);
    Ok(())
}

#[test]
fn test_strided_reads_on_rank_three() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let t = create_test_tensor(&[2, 3, 4]);
    let view = read(&rt, &t, &idx![-1, RangeKey::full().with_step(-1), 1..3])?;
    assert_eq!(view.shape(), vec![3, 2]);
    assert_eq!(values(&view), vec![21.0, 22.0, 17.0, 18.0, 13.0, 14.0]);
    Ok(())
}

#[test]
fn test_reads_agree_with_and_without_fast_paths() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let fast = Indexer::new(&rt);
    let slow = Indexer::with_options(&rt, IndexerOptions::default().with_fast_paths(false));
    let t = create_test_tensor(&[4, 3]);
    let keys = [
        IndexKey::Scalar(2),
        IndexKey::Scalar(-4),
        IndexKey::Range(RangeKey::new(1, 3)),
        IndexKey::Range(RangeKey::full()),
        IndexKey::Range(RangeKey::full().with_step(-2)),
        idx![1.., 0],
    ];
    for key in &keys {
        let a = fast.read(&t, key)?;
        let b = slow.read(&t, key)?;
        assert_eq!(a.shape(), b.shape(), "shape differs for {:?}", key);
        assert_eq!(values(&a), values(&b), "data differs for {:?}", key);
    }
    Ok(())
}

#[test]
fn test_rows_yield_each_sub_view() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let indexer = Indexer::new(&rt);
    let t = create_test_tensor(&[3, 2]);
    let rows = indexer.rows(&t).collect::<Result<Vec<_>, _>>()?;
    let data: Vec<Vec<f64>> = rows.iter().map(values).collect();
    assert_eq!(data, vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]]);
    Ok(())
}
