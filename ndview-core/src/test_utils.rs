use std::sync::Mutex;

use crate::cpu::{CpuRuntime, CpuTensor};
use crate::error::NdViewError;
use crate::runtime::{Invoker, OpRequest, Primitive};

/// A [`CpuRuntime`] that records the name of every primitive requested.
#[derive(Debug, Default)]
pub(crate) struct RecordingInvoker {
    inner: CpuRuntime,
    requests: Mutex<Vec<Primitive>>,
}

impl RecordingInvoker {
    pub(crate) fn new() -> Self {
        RecordingInvoker::default()
    }

    /// Primitive names requested so far, oldest first.
    pub(crate) fn requests(&self) -> Vec<&'static str> {
        self.requests.lock().unwrap().iter().map(|p| p.name()).collect()
    }

    /// Number of requests that wrote into their target.
    pub(crate) fn mutations(&self) -> usize {
        self.requests.lock().unwrap().iter().filter(|p| p.is_mutating()).count()
    }

    pub(crate) fn clear(&self) {
        self.requests.lock().unwrap().clear();
    }
}

impl Invoker for RecordingInvoker {
    type Tensor = CpuTensor;

    fn invoke(&self, request: OpRequest<'_, CpuTensor>) -> Result<CpuTensor, NdViewError> {
        self.requests.lock().unwrap().push(request.primitive());
        self.inner.invoke(request)
    }
}

/// Asserts `tensor` has `expected_shape` and holds `expected` (compared as f64).
pub(crate) fn check_tensor(tensor: &CpuTensor, expected_shape: &[usize], expected: &[f64]) {
    use crate::runtime::TensorMeta;
    assert_eq!(tensor.shape(), expected_shape, "shape mismatch");
    let actual = tensor.to_f64_vec().unwrap();
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (a, e) in actual.iter().zip(expected) {
        approx::assert_relative_eq!(*a, *e, epsilon = 1e-6);
    }
}
