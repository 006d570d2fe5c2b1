use {
    crate::DeviceError,
    std::{
        collections::HashSet,
        sync::{LazyLock, Mutex},
    },
};

// serial numbers of devices with an open session in this process
static CLAIMED: LazyLock<Mutex<HashSet<String>>> = LazyLock::new(|| Mutex::new(HashSet::new()));

/// Exclusive claim on a physical device, released on drop.
#[derive(Debug)]
pub(crate) struct DeviceLease {
    serial: String,
}

impl DeviceLease {
    pub(crate) fn acquire(serial: &str) -> Result<Self, DeviceError> {
        let mut claimed = CLAIMED.lock().unwrap_or_else(|e| e.into_inner());
        if !claimed.insert(serial.to_string()) {
            return Err(DeviceError::DeviceBusy(serial.to_string()));
        }
        log::debug!("claimed device {}", serial);
        Ok(Self {
            serial: serial.to_string(),
        })
    }
}

impl Drop for DeviceLease {
    fn drop(&mut self) {
        let mut claimed = CLAIMED.lock().unwrap_or_else(|e| e.into_inner());
        claimed.remove(&self.serial);
        log::debug!("released device {}", self.serial);
    }
}
