use std::cell::RefCell;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard};

static CWD: Mutex<()> = Mutex::new(());

/// Serializes tests that touch the process working directory and puts the
/// directory back when dropped.
pub struct CwdGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original);
    }
}

pub fn cwd_lock() -> CwdGuard {
    let lock = CWD.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let original = env::current_dir().unwrap_or_else(|_| env::temp_dir());
    CwdGuard {
        original,
        _lock: lock,
    }
}

/// Writer whose contents stay readable after it has been boxed away.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
