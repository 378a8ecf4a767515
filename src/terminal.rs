use crossterm::{execute, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout, Stdout};
use std::thread::{self, ThreadId};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn setup_terminal() -> Result<Tui, Box<dyn std::error::Error>> {
    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    install_panic_hook();
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

pub fn cleanup_terminal(terminal: &mut Tui) -> io::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        terminal::Clear(terminal::ClearType::All),
        terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()
}

// Leave the alternate screen before the panic message is printed, otherwise
// it is lost with the screen. Only a panic on the UI thread ends the app;
// fetch tasks run on runtime workers and their panics are caught there.
fn install_panic_hook() {
    let ui_thread = thread::current().id();
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if panicking_on(ui_thread) {
            let _ = terminal::disable_raw_mode();
            let _ = execute!(stdout(), terminal::LeaveAlternateScreen);
        }
        previous(info);
    }));
}

fn panicking_on(ui_thread: ThreadId) -> bool {
    thread::current().id() == ui_thread
}
