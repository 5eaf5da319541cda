use std::cell::Cell;
use std::rc::Rc;

/// Shared "the intro has finished" flag.
///
/// The typing trigger raises it, the frame loop reads it. Raising is
/// irreversible for the life of the signal; clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct OpeningSignal {
    opened: Rc<Cell<bool>>,
}

impl OpeningSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) {
        if !self.opened.replace(true) {
            log::info!("[scene] opening signal raised");
        }
    }

    pub fn is_open(&self) -> bool {
        self.opened.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = OpeningSignal::new();
        let b = a.clone();
        assert!(!b.is_open());
        a.open();
        assert!(b.is_open());
        a.open();
        assert!(a.is_open());
    }
}
