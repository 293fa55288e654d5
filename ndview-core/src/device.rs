use std::fmt;

/// The kind of compute device a tensor's data lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceKind {
    /// Main system memory. This is the default device.
    #[default]
    Cpu,
    /// A CUDA-style accelerator.
    Gpu,
    /// Pinned host memory, visible to accelerators.
    CpuPinned,
}

impl DeviceKind {
    /// Device type id as used by the runtime's context parameters.
    pub fn type_id(self) -> u32 {
        match self {
            DeviceKind::Cpu => 1,
            DeviceKind::Gpu => 2,
            DeviceKind::CpuPinned => 3,
        }
    }

    pub fn from_type_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(DeviceKind::Cpu),
            2 => Some(DeviceKind::Gpu),
            3 => Some(DeviceKind::CpuPinned),
            _ => None,
        }
    }
}

/// A device context: device kind plus device index.
///
/// Two tensors can only take part in the same primitive request when their
/// contexts compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Context {
    pub kind: DeviceKind,
    pub index: u32,
}

impl Context {
    pub const fn new(kind: DeviceKind, index: u32) -> Self {
        Context { kind, index }
    }

    pub const fn cpu() -> Self {
        Context::new(DeviceKind::Cpu, 0)
    }

    pub const fn gpu(index: u32) -> Self {
        Context::new(DeviceKind::Gpu, index)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            DeviceKind::Cpu => "cpu",
            DeviceKind::Gpu => "gpu",
            DeviceKind::CpuPinned => "cpu_pinned",
        };
        write!(f, "{}({})", name, self.index)
    }
}
