//! Confirmation of price decreases.
//!
//! Lowering a product's price needs an explicit yes/no from whoever drives the
//! catalog. The decision is injected through [`PriceConfirmation`] so tests can
//! answer deterministically and interactive front-ends can prompt a human.

use std::cell::RefCell;
use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

use tracing::warn;

/// Decides whether a price decrease from `old` to `new` may go ahead.
pub trait PriceConfirmation {
    fn confirm(&self, old: f64, new: f64) -> bool;
}

impl<F> PriceConfirmation for F
where
    F: Fn(f64, f64) -> bool,
{
    fn confirm(&self, old: f64, new: f64) -> bool {
        self(old, new)
    }
}

/// Approves every decrease.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl PriceConfirmation for AlwaysConfirm {
    fn confirm(&self, _old: f64, _new: f64) -> bool {
        true
    }
}

/// Declines every decrease. Used when no one is around to answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverConfirm;

impl PriceConfirmation for NeverConfirm {
    fn confirm(&self, _old: f64, _new: f64) -> bool {
        false
    }
}

/// Asks a yes/no question on a text stream.
///
/// Answers `y` and `yes` (case-insensitive) confirm. Anything else, including
/// end of input or an IO failure, declines.
pub struct PromptConfirmation<R, W> {
    io: RefCell<(R, W)>,
}

impl<R: BufRead, W: Write> PromptConfirmation<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: RefCell::new((reader, writer)),
        }
    }

    /// Gives back the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        self.io.into_inner()
    }

    fn ask(&self, old: f64, new: f64) -> io::Result<bool> {
        let mut io = self.io.borrow_mut();
        let (reader, writer) = &mut *io;

        write!(writer, "Lower the price from {old:?} to {new:?}? (y/n): ")?;
        writer.flush()?;

        let mut answer = String::new();
        reader.read_line(&mut answer)?;
        let answer = answer.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

impl PromptConfirmation<StdinLock<'static>, Stdout> {
    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> PriceConfirmation for PromptConfirmation<R, W> {
    fn confirm(&self, old: f64, new: f64) -> bool {
        match self.ask(old, new) {
            Ok(answer) => answer,
            Err(error) => {
                warn!(%error, "price confirmation prompt failed; treating as declined");
                false
            }
        }
    }
}

impl<R, W> core::fmt::Debug for PromptConfirmation<R, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PromptConfirmation").finish_non_exhaustive()
    }
}
