use crossterm::event::{poll, read, Event};
use crossterm::terminal;
use log::debug;
use std::io;
use std::time::Duration;

/// reads whatever the user does to ask for the animation to stop
pub trait Input {
    /// non-blocking check for a termination request
    fn cancel_requested(&mut self) -> Result<bool, io::Error>;
}

/// simple implementation of Input, using STDIN; any key stops the show
pub struct StdinInput {
    cancelled: bool,
}

impl StdinInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(StdinInput { cancelled: false })
    }

    fn read_stdin(&mut self) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => {
                    debug!("key {:?} pressed, cancelling", evt.code);
                    self.cancelled = true;
                }
                evt => debug!("ignoring event {:?}", evt),
            }
        }
        Ok(())
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for StdinInput {
    fn cancel_requested(&mut self) -> Result<bool, io::Error> {
        if !self.cancelled {
            self.read_stdin()?;
        }
        Ok(self.cancelled)
    }
}

/// dummy Input implementation for testing; cancels after a number of polls
pub struct DummyInput {
    polls_left: usize,
}

impl DummyInput {
    pub fn new(polls: usize) -> Self {
        DummyInput { polls_left: polls }
    }
}

impl Input for DummyInput {
    fn cancel_requested(&mut self) -> Result<bool, io::Error> {
        if self.polls_left == 0 {
            return Ok(true);
        }
        self.polls_left -= 1;
        Ok(false)
    }
}
