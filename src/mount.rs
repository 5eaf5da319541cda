/// Reconciles overlapping mount/unmount calls from the page.
///
/// A mount awaits GPU setup, so the page may unmount and mount again before
/// it settles. The gate keeps the latest request and at most one mount in
/// flight; the settling mount is installed only if a mount is still wanted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MountGate {
    wanted: bool,
    in_flight: bool,
}

impl MountGate {
    /// Records a mount request. Returns true when the caller should start one.
    pub fn request_mount(&mut self, mounted: bool) -> bool {
        self.wanted = true;
        if mounted || self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn request_unmount(&mut self) {
        self.wanted = false;
    }

    /// The in-flight mount finished. Returns true when its result should be kept.
    pub fn settle(&mut self) -> bool {
        self.in_flight = false;
        self.wanted
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}
