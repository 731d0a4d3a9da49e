//! `poll(2)`-backed readiness multiplexer (§4.7).

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::os::fd::{BorrowedFd, RawFd};
use std::time::Duration;

// Layer 2: Third-party crate imports
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};

// Layer 3: Internal module imports
use super::error::ReactorError;
use super::types::Interest;
use crate::util::ActorId;

struct Watch {
    owner: ActorId,
    interest: Interest,
}

/// Watches a set of file descriptors and reports readiness as `(owner, fd,
/// interest)` triples, which the runtime turns into `MSG_FD_EVENT` deliveries
/// (§4.7). The reactor does not own the watched fds; it borrows them for
/// the duration of each `poll` call, so closing or dropping the owning
/// transport/handle is what actually releases the descriptor; `unwatch` and
/// `unwatch_owner` only stop the reactor from polling it.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use microkernel_rt::reactor::{Interest, Reactor};
/// use microkernel_rt::util::{ActorId, NodeId};
///
/// let (read_fd, _write_fd) = nix::unistd::pipe().unwrap();
/// let owner = ActorId::new(NodeId::new(1), 1);
///
/// let mut reactor = Reactor::new();
/// reactor.watch(std::os::fd::AsRawFd::as_raw_fd(&read_fd), owner, Interest::READABLE);
/// let ready = reactor.poll(Duration::from_millis(0)).unwrap();
/// assert!(ready.is_empty()); // nothing written yet
/// ```
#[derive(Default)]
pub struct Reactor {
    watches: HashMap<RawFd, Watch>,
}

impl Reactor {
    /// A reactor watching nothing.
    pub fn new() -> Self {
        Self {
            watches: HashMap::new(),
        }
    }

    /// Start (or replace) a watch on `fd` for `owner` (§4.7).
    pub fn watch(&mut self, fd: RawFd, owner: ActorId, interest: Interest) {
        self.watches.insert(fd, Watch { owner, interest });
    }

    /// Stop watching `fd` (§4.7: "unwatch on fd close").
    pub fn unwatch(&mut self, fd: RawFd) {
        self.watches.remove(&fd);
    }

    /// Stop watching every fd registered by `owner` (§4.7: "dropping a
    /// watcher actor implicitly unwatches").
    pub fn unwatch_owner(&mut self, owner: ActorId) {
        self.watches.retain(|_, watch| watch.owner != owner);
    }

    /// Whether `fd` currently has a watch registered.
    pub fn is_watched(&self, fd: RawFd) -> bool {
        self.watches.contains_key(&fd)
    }

    /// Number of fds currently watched.
    pub fn len(&self) -> usize {
        self.watches.len()
    }

    /// Block for up to `timeout` waiting for readiness on any watched fd.
    /// Returns one `(owner, fd, interest)` entry per fd with activity.
    pub fn poll(&self, timeout: Duration) -> Result<Vec<(ActorId, RawFd, Interest)>, ReactorError> {
        if self.watches.is_empty() {
            return Ok(Vec::new());
        }

        let fds: Vec<RawFd> = self.watches.keys().copied().collect();
        let mut poll_fds: Vec<PollFd> = fds
            .iter()
            .map(|&fd| {
                // SAFETY: `fd` stays valid for the duration of this call; the
                // reactor does not outlive it past the owning transport/handle.
                let borrowed = unsafe { BorrowedFd::borrow_raw(fd) };
                PollFd::new(borrowed, to_poll_flags(self.watches[&fd].interest))
            })
            .collect();

        let timeout_ms = timeout.as_millis().min(i32::MAX as u128) as i32;
        let poll_timeout = PollTimeout::try_from(timeout_ms).unwrap_or(PollTimeout::MAX);
        poll(&mut poll_fds, poll_timeout)?;

        let mut ready = Vec::new();
        for (poll_fd, &fd) in poll_fds.iter().zip(fds.iter()) {
            if let Some(revents) = poll_fd.revents() {
                let interest = from_poll_flags(revents);
                if !interest.is_empty() {
                    ready.push((self.watches[&fd].owner, fd, interest));
                }
            }
        }
        Ok(ready)
    }
}

fn to_poll_flags(interest: Interest) -> PollFlags {
    let mut flags = PollFlags::empty();
    if interest.contains(Interest::READABLE) {
        flags |= PollFlags::POLLIN;
    }
    if interest.contains(Interest::WRITABLE) {
        flags |= PollFlags::POLLOUT;
    }
    flags
}

fn from_poll_flags(flags: PollFlags) -> Interest {
    let mut interest = Interest::NONE;
    if flags.contains(PollFlags::POLLIN) {
        interest = interest | Interest::READABLE;
    }
    if flags.contains(PollFlags::POLLOUT) {
        interest = interest | Interest::WRITABLE;
    }
    interest
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::fd::AsRawFd;

    use crate::util::NodeId;

    #[test]
    fn readable_pipe_end_is_reported_ready() {
        let (read_fd, write_fd) = nix::unistd::pipe().unwrap();
        let owner = ActorId::new(NodeId::new(1), 1);
        let mut reactor = Reactor::new();
        reactor.watch(read_fd.as_raw_fd(), owner, Interest::READABLE);

        let mut file = std::fs::File::from(write_fd);
        file.write_all(b"x").unwrap();

        let ready = reactor.poll(Duration::from_millis(100)).unwrap();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].0, owner);
        assert!(ready[0].2.contains(Interest::READABLE));
    }

    #[test]
    fn unwatch_stops_reporting_readiness() {
        let (read_fd, write_fd) = nix::unistd::pipe().unwrap();
        let owner = ActorId::new(NodeId::new(1), 1);
        let mut reactor = Reactor::new();
        let fd = read_fd.as_raw_fd();
        reactor.watch(fd, owner, Interest::READABLE);
        reactor.unwatch(fd);

        let mut file = std::fs::File::from(write_fd);
        file.write_all(b"x").unwrap();
        std::mem::forget(read_fd);

        assert!(!reactor.is_watched(fd));
    }

    #[test]
    fn unwatch_owner_removes_every_fd_for_that_owner() {
        let (read_a, write_a) = nix::unistd::pipe().unwrap();
        let (read_b, write_b) = nix::unistd::pipe().unwrap();
        let owner = ActorId::new(NodeId::new(1), 1);
        let mut reactor = Reactor::new();
        reactor.watch(read_a.as_raw_fd(), owner, Interest::READABLE);
        reactor.watch(read_b.as_raw_fd(), owner, Interest::READABLE);
        reactor.unwatch_owner(owner);
        assert_eq!(reactor.len(), 0);
        drop((write_a, write_b));
    }
}
