// scopeview: scope-checking front-end with a live token and syntax-tree viewer

use std::fs;
use std::io;
use std::process::ExitCode;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use scopeview::analysis::Analysis;
use scopeview::cli::{self, Command, Input, Mode, Options};
use scopeview::sample::SAMPLE_SOURCE;
use scopeview::ui::App;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("scopeview");

    let options = match cli::parse_args(args.iter().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            println!("{}", cli::usage(program_name));
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", cli::usage(program_name));
            return Ok(ExitCode::FAILURE);
        }
    };

    let (path, source) = match &options.input {
        Input::Sample => (None, SAMPLE_SOURCE.to_string()),
        Input::File(path) => match fs::read_to_string(path) {
            Ok(source) => (Some(path.clone()), source),
            Err(e) => {
                eprintln!("Error: Cannot read '{}': {}", path.display(), e);
                return Ok(ExitCode::FAILURE);
            }
        },
    };

    if options.mode == Mode::View {
        run_viewer(path, source)?;
        return Ok(ExitCode::SUCCESS);
    }

    Ok(run_batch(&options, &source))
}

/// Print tokens, tree or verdict for the non-interactive modes.
fn run_batch(options: &Options, source: &str) -> ExitCode {
    let analysis = Analysis::run(source);

    match options.mode {
        Mode::Tokens => {
            for token in analysis.visible_tokens() {
                println!("{}", token);
            }
        }
        Mode::Ast => {
            if let Some(program) = &analysis.program {
                for row in program.outline() {
                    println!("{}{}", "  ".repeat(row.depth), row);
                }
            }
        }
        Mode::Check => {
            if analysis.is_clean() {
                println!("{}", analysis.status_line());
            }
        }
        Mode::View => {}
    }

    match &analysis.error {
        Some(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}

fn run_viewer(
    path: Option<std::path::PathBuf>,
    source: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(path, source);
    eprintln!("Analysed {}: {}", app.source_name(), app.analysis.status_line());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
