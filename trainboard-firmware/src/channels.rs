//! Inter-task communication
//!
//! Static embassy-sync primitives shared between the clock and render
//! tasks. The route table is replaced wholesale under a blocking mutex,
//! never edited in place, so the render task always sees a complete
//! table.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

use trainboard_core::config::RouteTable;

/// Active route table
static ROUTES: Mutex<CriticalSectionRawMutex, RefCell<RouteTable>> =
    Mutex::new(RefCell::new(RouteTable::new()));

/// Signals that a new route table was installed
pub static ROUTES_CHANGED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Current virtual minute of day, signalled only when it changes
pub static MINUTE: Signal<CriticalSectionRawMutex, u16> = Signal::new();

/// Swap in a new route table and wake the render task
pub fn install_routes(table: RouteTable) {
    ROUTES.lock(|slot| slot.replace(table));
    ROUTES_CHANGED.signal(());
}

/// Clone the active route table
pub fn snapshot_routes() -> RouteTable {
    ROUTES.lock(|slot| slot.borrow().clone())
}
