use std::ptr;

/// Bumped once per loop iteration. Only ever accessed volatile, which keeps
/// the optimizer from folding the loop away.
static mut COUNTER: u32 = 0;

/// Increment [`COUNTER`] `count` times. Does nothing if `count <= 0`.
#[inline(never)]
#[unsafe(no_mangle)]
#[cfg_attr(target_os = "linux", unsafe(link_section = ".text.correct"))]
pub extern "C" fn correct(count: i64) {
    for _ in 0..count {
        unsafe {
            let counter = &raw mut COUNTER;
            ptr::write_volatile(counter, ptr::read_volatile(counter).wrapping_add(1));
        }
    }
}
