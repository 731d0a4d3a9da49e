//! File-descriptor readiness delivered as `MSG_FD_EVENT`, driven through a
//! full [`Runtime`] step loop rather than the reactor in isolation.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

// Layer 1: Standard library imports
use std::cell::Cell;
use std::io::Write;
use std::os::fd::AsRawFd;
use std::rc::Rc;
use std::time::{Duration, Instant};

// Layer 3: Internal module imports
use microkernel_rt::actor::Behavior;
use microkernel_rt::message::{Message, SystemMessage};
use microkernel_rt::reactor::Interest;
use microkernel_rt::runtime::{Context, Runtime, RuntimeConfig};
use microkernel_rt::util::NodeId;

const BOOTSTRAP: u32 = 0;

struct FdWatcher {
    fd: i32,
    observed: Rc<Cell<bool>>,
}

impl Behavior for FdWatcher {
    fn handle(&mut self, ctx: &mut Context<'_>, msg: &Message) -> bool {
        if msg.msg_type() == BOOTSTRAP {
            ctx.watch_fd(self.fd, Interest::READABLE);
            return true;
        }
        if let Some(SystemMessage::FdEvent { fd, .. }) = SystemMessage::decode(msg.msg_type(), msg.payload()) {
            if fd == self.fd {
                self.observed.set(true);
            }
        }
        false
    }
}

#[test]
fn writing_to_a_watched_pipe_delivers_an_fd_event() {
    let (read_fd, write_fd) = nix::unistd::pipe().unwrap();
    let raw_fd = read_fd.as_raw_fd();

    let config = RuntimeConfig::builder().with_node_id(NodeId::new(1)).build().unwrap();
    let mut runtime = Runtime::init(config).unwrap();

    let observed = Rc::new(Cell::new(false));
    let id = runtime
        .spawn(
            Box::new(FdWatcher {
                fd: raw_fd,
                observed: observed.clone(),
            }),
            4,
        )
        .unwrap();
    assert!(runtime.send(id, BOOTSTRAP, &[]));
    runtime.step(); // dispatches the bootstrap, registers the watch

    let mut file = std::fs::File::from(write_fd);
    file.write_all(b"x").unwrap();

    let deadline = Instant::now() + Duration::from_secs(2);
    while runtime.is_alive(id) && Instant::now() < deadline {
        runtime.step();
    }

    assert!(observed.get());
    assert!(!runtime.is_alive(id));
}
