use log::debug;

use crate::core::components::StimulableDevice;

/// Scoped ownership of a device instance.
///
/// The session is the only owner of the device for the length of a run. The
/// device is finalized exactly once, either through `close()` or when the
/// session is dropped on an early return or unwind, and is released right
/// after.
#[derive(Debug)]
pub struct DeviceSession<D: StimulableDevice> {
    device: D,
    finalized: bool,
}

impl<D: StimulableDevice> DeviceSession<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            finalized: false,
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Finalize the device if that has not happened yet
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        debug!("{}: finalizing", self.device.name());
        self.device.finalize();
    }

    /// Finalize and release the device
    pub fn close(mut self) {
        self.finalize();
    }
}

impl<D: StimulableDevice> Drop for DeviceSession<D> {
    fn drop(&mut self) {
        self.finalize();
    }
}
