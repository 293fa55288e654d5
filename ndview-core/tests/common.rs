use ndview_core::CpuTensor;

// Helper function to create an F32 tensor holding 0..numel laid out as `shape`.
// Added allow(dead_code) because usage across different test crates isn't detected easily.
#[allow(dead_code)]
pub(crate) fn create_test_tensor(shape: &[usize]) -> CpuTensor {
    CpuTensor::arange(shape).expect("Test tensor creation failed")
}

/// Data of `tensor` as f64, for comparisons across dtypes.
#[allow(dead_code)]
pub(crate) fn values(tensor: &CpuTensor) -> Vec<f64> {
    tensor.to_f64_vec().expect("Reading tensor data failed")
}
