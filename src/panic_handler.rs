use std::io::{self, Write};
use std::panic::{self, PanicHookInfo};

use crossterm::{
    cursor::Show,
    event::DisableMouseCapture,
    execute,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};
use log::error;

/// Install `better_panic` and a hook that gives the terminal back before
/// the backtrace is printed. The panic is also written to the log file,
/// since the alternate screen hides anything printed while it is active.
pub fn initialize_panic_handler() {
    better_panic::install();

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        error!("{}", describe_panic(info));
        default_hook(info);
        std::process::exit(1);
    }));
}

fn describe_panic(info: &PanicHookInfo<'_>) -> String {
    let payload = info
        .payload()
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| info.payload().downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string payload".to_string());
    match info.location() {
        Some(loc) => format!("panic at {}:{}: {payload}", loc.file(), loc.line()),
        None => format!("panic: {payload}"),
    }
}

/// Leave raw mode, the alternate screen and mouse capture, and show the
/// cursor again. Errors are ignored: this also runs while panicking.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
    let _ = writeln!(io::stderr());
}
