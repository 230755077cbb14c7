//! Interactive page review for `pagesmith delete --interactive`.
//!
//! The prompt reads one command per line:
//!
//! | input   | effect                                  |
//! |---------|-----------------------------------------|
//! | `<n>`   | toggle page n                           |
//! | `s<n>`  | swipe page n to the left (toggles it)   |
//! | `list`  | print the pages again                   |
//! | `done`  | write the kept pages                    |
//! | `quit`  | stop without writing                    |

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use pagesmith::codec::DocumentCodec;
use pagesmith::error::{PageSmithError, Result};
use pagesmith::output::{OutputFormatter, display_grid};
use pagesmith::render::ReviewGrid;
use pagesmith::session::PageMark;
use pagesmith::Session;

const PROMPT: &str = "page> ";

/// One line of prompt input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewCommand {
    /// Toggle a page (1-based).
    Toggle(usize),
    /// Swipe a page left (1-based).
    Swipe(usize),
    /// Print the page table.
    List,
    /// Confirm the selection.
    Done,
    /// Abandon the review.
    Quit,
    /// Show the command summary.
    Help,
}

/// Parse one prompt line.
pub fn parse_command(line: &str) -> std::result::Result<ReviewCommand, String> {
    let line = line.trim();
    let page = |digits: &str| match digits.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("not a page number: {digits}")),
        Ok(n) => Ok(n),
    };

    match line.to_lowercase().as_str() {
        "list" | "l" => Ok(ReviewCommand::List),
        "done" | "d" => Ok(ReviewCommand::Done),
        "quit" | "q" => Ok(ReviewCommand::Quit),
        "help" | "h" | "?" => Ok(ReviewCommand::Help),
        other => match other.strip_prefix('s') {
            Some(rest) => page(rest.trim()).map(ReviewCommand::Swipe),
            None => page(other).map(ReviewCommand::Toggle),
        },
    }
}

fn help(formatter: &OutputFormatter) {
    formatter.info("<n> toggle page n, s<n> swipe page n, list, done, quit");
}

fn print_pages<C: DocumentCodec>(
    session: &Session<C>,
    grid: &ReviewGrid,
    formatter: &OutputFormatter,
) {
    if let Some(review) = session.review() {
        display_grid(formatter, &grid.rows(review.selection()));
    }
}

/// Run the prompt until the user confirms or quits.
///
/// A swipe is fed to the session as a touch that moves `swipe_distance`
/// pixels to the left.
///
/// # Errors
///
/// Returns [`PageSmithError::Cancelled`] on `quit` or end of input, or an I/O
/// error from the terminal.
pub async fn run<C, R, W>(
    session: &mut Session<C>,
    grid: &ReviewGrid,
    formatter: &OutputFormatter,
    swipe_distance: f32,
    input: R,
    mut prompt: W,
) -> Result<()>
where
    C: DocumentCodec,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    print_pages(session, grid, formatter);
    help(formatter);

    let mut lines = input.lines();
    loop {
        prompt.write_all(PROMPT.as_bytes()).await?;
        prompt.flush().await?;

        let Some(line) = lines.next_line().await? else {
            return Err(PageSmithError::Cancelled);
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                formatter.warning(&message);
                continue;
            }
        };

        let (number, outcome) = match command {
            ReviewCommand::Toggle(number) => (number, session.toggle_page(number - 1).map(Some)),
            ReviewCommand::Swipe(number) => {
                session.touch_start(number - 1, swipe_distance);
                (number, session.touch_end(number - 1, 0.0))
            }
            ReviewCommand::List => {
                print_pages(session, grid, formatter);
                continue;
            }
            ReviewCommand::Help => {
                help(formatter);
                continue;
            }
            ReviewCommand::Done => return Ok(()),
            ReviewCommand::Quit => return Err(PageSmithError::Cancelled),
        };

        match outcome {
            Ok(Some(mark)) => {
                let verb = match mark {
                    PageMark::Kept => "kept",
                    PageMark::Discarded => "discarded",
                };
                formatter.info(&format!("Page {number} {verb}"));
            }
            Ok(None) => {}
            Err(err @ PageSmithError::PageOutOfRange { .. }) => formatter.warning(&err.to_string()),
            Err(err) => return Err(err),
        }
    }
}
