//! The interactive `chat` command.
//!
//! Each pass through the loop renders whichever screen the session is on and feeds the user's
//! input back in as one transition:
//! - topic entry: a text prompt, an empty topic quits
//! - paper list: a selection list with a trailing Back entry
//! - conversation: a message prompt, with `/back`, `/download`, `/related` and `/quit`
//!
//! A message that really starts with a slash is sent by doubling it: `//back` sends `/back`.

use dialoguer::{Input, Select};
use paperchat::{
  controller::Controller,
  format,
  session::Screen,
  Message, PaperRecord, Role,
};

use super::*;

/// Label of the extra entry at the bottom of the paper list.
const BACK_ITEM: &str = "← Back";

/// Prompt shown in the conversation.
const MESSAGE_PROMPT: &str = "You (/back, /download, /related, /quit; // for a leading slash)";

/// What a line typed in the conversation asks for.
#[derive(Debug, Eq, PartialEq)]
enum Command<'a> {
  /// Leave the chat
  Quit,
  /// Return to the paper list
  Back,
  /// Ask the download service for the selected paper
  Download,
  /// List the other papers from the search
  Related,
  /// Send this text to the chat endpoint
  Send(&'a str),
}

/// Reads one conversation line as a command or a message.
fn command(input: &str) -> Command<'_> {
  match input.trim() {
    "/quit" => Command::Quit,
    "/back" => Command::Back,
    "/download" => Command::Download,
    "/related" => Command::Related,
    escaped if escaped.starts_with("//") => Command::Send(&escaped[1..]),
    _ => Command::Send(input),
  }
}

/// What the entry at `index` of the paper list stands for.
#[derive(Debug, Eq, PartialEq)]
enum Choice<'a> {
  /// One of the search results
  Paper(&'a PaperRecord),
  /// The trailing Back entry
  Back,
}

/// Maps a list position to a paper, with anything past the results meaning Back.
fn choice(results: &[PaperRecord], index: usize) -> Choice<'_> {
  results.get(index).map_or(Choice::Back, Choice::Paper)
}

/// The topic to search for, or `None` if the user entered nothing and wants to quit.
fn search_topic(input: &str) -> Option<&str> { (!input.trim().is_empty()).then_some(input) }

/// Carries out one conversation command. Returns `false` when the user asked to quit.
async fn handle(controller: &mut Controller, command: Command<'_>) -> bool {
  match command {
    Command::Quit => return false,
    Command::Back => {
      controller.back();
    },
    Command::Download => download(controller).await,
    Command::Related => related(controller),
    Command::Send(text) =>
      if let Some(reply) = controller.send_message(text).await {
        print_message(&reply);
      },
  }
  true
}

/// Runs the chat loop until the user quits.
///
/// If `topic` is given it is searched for immediately instead of prompting.
pub async fn run(
  controller: &mut Controller,
  mut topic: Option<String>,
) -> Result<(), PaperchatCliError> {
  println!("{} {}", style(BOOKS).cyan(), style("arXiv Paper Chatbot").bold());

  loop {
    match controller.session().screen() {
      Screen::TopicEntry => {
        let input = match topic.take() {
          Some(topic) => topic,
          None => Input::<String>::new()
            .with_prompt("Enter topic to search (empty to quit)")
            .allow_empty(true)
            .interact_text()?,
        };
        let Some(query) = search_topic(&input) else {
          return Ok(());
        };

        println!("{} Searching for: {}", style(LOOKING_GLASS).cyan(), style(query).yellow());
        controller.search(query).await;
      },

      Screen::PaperList => {
        let results = controller.session().results();
        if results.is_empty() {
          println!(
            "{} No papers found for: {}",
            style(WARNING).yellow(),
            style(controller.session().topic()).yellow()
          );
        }

        let mut items: Vec<String> = results
          .iter()
          .map(|paper| format!("{}. {}", paper.id, format::preview(&paper.title, 100)))
          .collect();
        items.push(BACK_ITEM.to_string());

        let index = Select::new()
          .with_prompt("Select a recent paper to discuss")
          .items(&items)
          .default(0)
          .interact()?;

        let chosen = match choice(results, index) {
          Choice::Paper(paper) => Some(paper.clone()),
          Choice::Back => None,
        };
        match chosen {
          Some(paper) => {
            controller.select_paper(paper);
            if let Some(selected) = controller.session().selected() {
              println!("\n{} {}", style(PAPER).green(), style(&selected.title).white().bold());
            }
            controller.session().history().iter().for_each(print_message);
          },
          None => {
            controller.back();
          },
        }
      },

      Screen::Conversation => {
        let input =
          Input::<String>::new().with_prompt(MESSAGE_PROMPT).allow_empty(true).interact_text()?;

        if !handle(controller, command(&input)).await {
          return Ok(());
        }
      },
    }
  }
}

/// Prints one conversation message.
fn print_message(message: &Message) {
  match message.role {
    Role::User => println!("{} {}", style("You:").blue().bold(), message.content),
    Role::Assistant => println!("\n{} {}\n", style(ROBOT).green(), style(&message.content).white()),
  }
}

/// Triggers a download of the selected paper and reports the outcome.
async fn download(controller: &Controller) {
  match controller.download().await {
    Ok(_) => println!("{} Download requested", style(SAVE).green()),
    Err(e) => println!("{} Download failed: {e}", style(WARNING).yellow()),
  }
}

/// Lists the other papers from the same search.
fn related(controller: &Controller) {
  let recommendations = controller.session().recommendations();
  if recommendations.is_empty() {
    println!("{} No other papers in this search", style("ℹ").blue());
    return;
  }

  println!("\n{} Recommended papers:", style(BOOKS).cyan());
  for paper in recommendations {
    println!("   {} {}", style(paper.id).yellow(), style(format::preview(&paper.title, 100)).white());
  }
  println!();
}
