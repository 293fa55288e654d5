use approx::assert_relative_eq;
use ndview_core::{
    idx, read, write, Context, CpuRuntime, CpuTensor, DType, IndexKey, Indexer, IndexerOptions,
    NdViewError, RangeKey, TensorMeta, Value, WriteAction,
};

mod common;
use common::{create_test_tensor, values};

#[test]
fn test_scalar_fill_over_whole_selection() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let t = create_test_tensor(&[2, 3]);
    write(&rt, &t, &idx![0..2, ..], 7.0)?;
    assert_eq!(t.shape(), vec![2, 3]);
    for v in values(&t) {
        assert_relative_eq!(v, 7.0);
    }
    Ok(())
}

#[test]
fn test_scalar_fill_matches_without_fast_paths() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let slow = Indexer::with_options(&rt, IndexerOptions::default().with_fast_paths(false));
    let t = create_test_tensor(&[2, 3]);
    slow.write(&t, &idx![0..2, ..], 7.0)?;
    assert_eq!(values(&t), vec![7.0; 6]);
    Ok(())
}

#[test]
fn test_broadcast_row_assign() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let t = create_test_tensor(&[2, 3]);
    let row = CpuTensor::from_vec_f32(vec![9.0, 8.0, 7.0], vec![1, 3])?;
    write(&rt, &t, &idx![.., ..], &row)?;
    assert_eq!(values(&t), vec![9.0, 8.0, 7.0, 9.0, 8.0, 7.0]);
    Ok(())
}

#[test]
fn test_broadcast_column_into_strided_region() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let t = CpuTensor::zeros(&[3, 4], DType::F64, Context::cpu())?;
    let column = CpuTensor::from_vec_f64(vec![1.0, 2.0], vec![2, 1])?;
    write(&rt, &t, &idx![RangeKey::full().with_step(2), 1..3], &column)?;
    assert_eq!(
        values(&t),
        vec![0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 2.0, 0.0]
    );
    Ok(())
}

#[test]
fn test_write_then_read_round_trips_selection() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let t = CpuTensor::zeros(&[3, 3], DType::I32, Context::cpu())?;
    let value = CpuTensor::from_vec_i32(vec![1, 2, 3], vec![3])?;
    let key = idx![.., -1];
    write(&rt, &t, &key, &value)?;
    assert_eq!(values(&read(&rt, &t, &key)?), vec![1.0, 2.0, 3.0]);
    assert_eq!(values(&t), vec![0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0, 3.0]);
    Ok(())
}

#[test]
fn test_value_is_copied_across_contexts_and_cast() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let t = CpuTensor::zeros(&[2, 2], DType::F32, Context::gpu(1))?;
    let value = CpuTensor::from_vec_f64(vec![0.5, 1.5], vec![2])?;
    write(&rt, &t, &IndexKey::Scalar(1), &value)?;
    assert_eq!(t.context(), Context::gpu(1));
    assert_eq!(t.dtype(), DType::F32);
    assert_eq!(t.get_f32_data()?, vec![0.0, 0.0, 0.5, 1.5]);
    assert_eq!(value.context(), Context::cpu());
    Ok(())
}

#[test]
fn test_incompatible_value_leaves_tensor_unchanged() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let t = create_test_tensor(&[2, 3]);
    let before = values(&t);
    let value = CpuTensor::from_vec_f32(vec![1.0, 2.0], vec![2])?;
    let result = write(&rt, &t, &IndexKey::Scalar(0), &value);
    assert!(matches!(result, Err(NdViewError::ShapeMismatch { .. })));
    assert_eq!(values(&t), before);
    Ok(())
}

#[test]
fn test_non_numeric_value_is_rejected() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let t = create_test_tensor(&[2, 3]);
    let before = values(&t);
    let result = write(&rt, &t, &IndexKey::Scalar(0), Value::Bool(false));
    assert!(matches!(result, Err(NdViewError::UnsupportedValueType(_))));
    assert_eq!(values(&t), before);
    Ok(())
}

#[test]
fn test_out_of_range_write_fails() {
    let rt = CpuRuntime::new();
    let t = create_test_tensor(&[2, 3]);
    let result = write(&rt, &t, &idx![0, 3], 1.0);
    assert!(matches!(
        result,
        Err(NdViewError::IndexOutOfRange { index: 3, axis: 1, axis_length: 3 })
    ));
}

#[test]
fn test_self_copy_over_identity_is_noop() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let indexer = Indexer::new(&rt);
    let t = create_test_tensor(&[2, 3]);
    let key = IndexKey::Range(RangeKey::full());

    let plan = indexer.plan(&t, &key, &t)?;
    assert!(matches!(plan.action, WriteAction::Noop));

    indexer.write(&t, &key, &t)?;
    assert_eq!(values(&t), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    Ok(())
}

#[test]
fn test_self_copy_through_shifted_window() -> Result<(), NdViewError> {
    let rt = CpuRuntime::new();
    let t = create_test_tensor(&[5]);
    let head = read(&rt, &t, &IndexKey::Range(RangeKey::new(0, 3)))?;
    write(&rt, &t, &IndexKey::Range(RangeKey::new(2, 5)), &head)?;
    assert_eq!(values(&t), vec![0.0, 1.0, 0.0, 1.0, 2.0]);
    Ok(())
}
