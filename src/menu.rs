use crate::config::Config;
use crate::domain::{format_hms, parse_days, parse_minutes, Moment, TimerMode};
use crate::error::TimerError;
use crate::notifications;
use crate::report::{recent_summary, text_chart, today_summary};
use crate::session::{StudySession, TickEvent};
use crate::ticker::Ticker;
use anyhow::Result;
use chrono::Local;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Longest single sleep while waiting for a tick, so Ctrl+C is noticed quickly
const INTERRUPT_POLL: Duration = Duration::from_millis(50);

/// How a running clock stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockOutcome {
    Interrupted,
    Expired,
}

/// Blocking, prompt-driven front end. Reads choices from `input`, draws on
/// `out`, and treats `interrupted` (set by a SIGINT handler) as "stop".
pub struct Menu<R, W> {
    session: StudySession,
    input: R,
    out: W,
    interrupted: Arc<AtomicBool>,
    tick: Duration,
    default_days: u32,
    max_days: u32,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(
        session: StudySession,
        config: &Config,
        input: R,
        out: W,
        interrupted: Arc<AtomicBool>,
    ) -> Self {
        Self {
            session,
            input,
            out,
            interrupted,
            tick: config.text_tick,
            default_days: config.default_recent_days,
            max_days: config.max_recent_days,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Main menu loop; returns on "exit" or end of input
    pub fn run(&mut self) -> Result<()> {
        self.session.store().ensure()?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Choose an option (1-5): ")? else {
                writeln!(self.out, "\nBye!")?;
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.run_count_up()?,
                "2" => self.run_countdown()?,
                "3" => {
                    writeln!(self.out, "Bye!")?;
                    return Ok(());
                }
                "4" => self.show_today()?,
                "5" => self.show_recent()?,
                _ => writeln!(self.out, "Invalid option, please choose 1-5.\n")?,
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out, "============== Study Timer ==============")?;
        writeln!(self.out, "1. Count up (Ctrl+C to stop)")?;
        writeln!(self.out, "2. Count down (Ctrl+C to stop early)")?;
        writeln!(self.out, "3. Exit")?;
        writeln!(self.out, "4. Today's total")?;
        writeln!(self.out, "5. Recent trend")?;
        Ok(())
    }

    /// Print `message` and read one trimmed line. `None` on end of input or
    /// when Ctrl+C arrived while waiting. Invalid UTF-8 is replaced, not an error.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;

        let mut line = Vec::new();
        let read = self.input.read_until(b'\n', &mut line)?;
        if self.interrupted.swap(false, Ordering::SeqCst) {
            writeln!(self.out)?;
            return Ok(None);
        }
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    fn run_count_up(&mut self) -> Result<()> {
        if self
            .prompt("Press Enter to start counting up (Ctrl+C stops and saves)...")?
            .is_none()
        {
            return Ok(());
        }

        let at = Moment::now();
        if let Err(e) = self.session.start_count_up_at(at) {
            writeln!(self.out, "❌ {}\n", e)?;
            return Ok(());
        }
        writeln!(self.out, "⏱ Started at {}", at.wall.format("%Y-%m-%d %H:%M:%S"))?;

        self.run_clock()?;
        self.finish_and_save()
    }

    fn run_countdown(&mut self) -> Result<()> {
        let target = loop {
            let Some(raw) = self.prompt("Minutes to study (e.g. 25, empty to cancel): ")? else {
                return Ok(());
            };
            if raw.is_empty() {
                writeln!(self.out)?;
                return Ok(());
            }
            match parse_minutes(&raw) {
                Ok(target) => break target,
                Err(e) => writeln!(self.out, "❌ {}. Please try again.", e)?,
            }
        };

        if let Err(e) = self.session.start_countdown_at(target, Moment::now()) {
            writeln!(self.out, "❌ {}\n", e)?;
            return Ok(());
        }
        writeln!(
            self.out,
            "⏱ {:.1}-minute count-down started. Ctrl+C stops early.",
            target.as_secs_f64() / 60.0
        )?;

        match self.run_clock()? {
            ClockOutcome::Expired => {
                writeln!(self.out, "\n⏰ Time's up! Well done.")?;
                if let Some(done) = self.session.pending() {
                    notifications::notify_countdown_finished(done.minutes());
                }
            }
            ClockOutcome::Interrupted => {
                writeln!(self.out, "\n⏹ Count-down stopped early.")?;
            }
        }
        self.finish_and_save()
    }

    /// Redraw the clock every tick until Ctrl+C or count-down expiry
    fn run_clock(&mut self) -> Result<ClockOutcome> {
        self.interrupted.store(false, Ordering::SeqCst);
        let mut ticker = Ticker::new(self.tick, Instant::now());
        self.render_clock()?;

        loop {
            if self.interrupted.swap(false, Ordering::SeqCst) {
                writeln!(self.out)?;
                return Ok(ClockOutcome::Interrupted);
            }

            if ticker.poll(Instant::now()) {
                if let Some(TickEvent::Expired(_)) = self.session.tick() {
                    self.render_clock()?;
                    return Ok(ClockOutcome::Expired);
                }
                self.render_clock()?;
            }

            let wait = ticker.time_until_due(Instant::now()).min(INTERRUPT_POLL);
            thread::sleep(wait);
        }
    }

    fn render_clock(&mut self) -> Result<()> {
        let timer = self.session.timer();
        let line = match (timer.mode(), timer.remaining()) {
            (TimerMode::CountDown, Some(remaining)) => {
                format!("⏳ Remaining: {}", format_hms(remaining))
            }
            _ => match self.session.pending() {
                Some(done) if done.mode == TimerMode::CountDown => {
                    format!("⏳ Remaining: {}", format_hms(Duration::ZERO))
                }
                _ => format!("⏳ Elapsed: {}", format_hms(timer.elapsed())),
            },
        };
        write!(self.out, "\r{}", line)?;
        self.out.flush()?;
        Ok(())
    }

    /// Finish the running session (if any), ask for a note, append it
    fn finish_and_save(&mut self) -> Result<()> {
        if self.session.pending().is_none() {
            match self.session.finish() {
                Ok(_) => {}
                Err(TimerError::NothingToSave) => {
                    writeln!(self.out, "Nothing to save: no time was recorded.\n")?;
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }

        let Some(done) = self.session.pending() else {
            return Ok(());
        };
        writeln!(self.out, "⌛ This session: {:.2} minutes", done.minutes())?;

        // The session is saved even if the note can't be read
        let note = match self.prompt("Add a note (e.g. calculus homework), Enter to skip: ") {
            Ok(note) => note.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "could not read note, saving without one");
                String::new()
            }
        };
        if let Some(record) = self.session.save_pending(&note)? {
            info!(minutes = record.duration_minutes, "saved from text menu");
            writeln!(
                self.out,
                "✅ Session saved to {}\n",
                self.session.store().path().display()
            )?;
        }
        Ok(())
    }

    fn show_today(&mut self) -> Result<()> {
        let total = self.session.total_for_day(Local::now().date_naive())?;
        writeln!(self.out, "============== Today ==============")?;
        writeln!(self.out, "{}\n", today_summary(&total))?;
        Ok(())
    }

    fn show_recent(&mut self) -> Result<()> {
        let days = loop {
            let message = format!("How many days? [{}]: ", self.default_days);
            let Some(raw) = self.prompt(&message)? else {
                return Ok(());
            };
            if raw.is_empty() {
                break self.default_days;
            }
            match parse_days(&raw, self.max_days) {
                Ok(days) => break days,
                Err(e) => writeln!(self.out, "❌ {}. Please try again.", e)?,
            }
        };

        let chart = matches!(
            self.prompt("Draw a chart? [y/N]: ")?.as_deref(),
            Some("y") | Some("Y") | Some("yes")
        );

        let totals = self.session.daily_totals(days, Local::now().date_naive())?;
        writeln!(self.out, "============== Recent ==============")?;
        writeln!(self.out, "{}", recent_summary(&totals))?;
        if chart {
            writeln!(self.out)?;
            write!(self.out, "{}", text_chart(&totals))?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}
