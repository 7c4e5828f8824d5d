//! Draws render commands as plain terminal output.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use bm_session::render::{
    ChoiceState, ChoiceView, DetailRow, Feedback, FeedbackKind, HistoryView, ResultsView,
    StatsView, TimerView,
};
use bm_session::{RenderCommand, RenderSink};

/// Prints every command to stdout.
#[derive(Debug, Default)]
pub struct TerminalSink {
    all_details: bool,
    last_timers: Option<TimerView>,
}

impl TerminalSink {
    /// A sink that expands history details only for entries flagged visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that expands the details of every history entry.
    pub fn with_all_details() -> Self {
        Self {
            all_details: true,
            ..Self::default()
        }
    }

    fn timers(&mut self, view: TimerView) {
        // Both clocks often fire on the same tick.
        if self.last_timers.as_ref() == Some(&view) {
            return;
        }
        println!(
            "  {} total {} | question {}",
            "⏱".dimmed(),
            view.total,
            view.question
        );
        self.last_timers = Some(view);
    }
}

impl RenderSink for TerminalSink {
    fn render(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::Question(q) => {
                println!();
                println!(
                    "  {} {}",
                    format!("Question {}/{}:", q.number, q.total).bold(),
                    q.prompt.bold()
                );
            }
            RenderCommand::Choices(choices) => print_choices(&choices),
            RenderCommand::Feedback(feedback) => print_feedback(&feedback),
            RenderCommand::Timers(view) => self.timers(view),
            RenderCommand::Stats(view) => print_stats(&view),
            RenderCommand::Results(view) => print_results(&view),
            RenderCommand::History(view) => print_history(&view, self.all_details),
        }
    }
}

fn print_choices(choices: &[ChoiceView]) {
    if choices.is_empty() {
        return;
    }
    let cells: Vec<String> = choices
        .iter()
        .map(|c| {
            let label = c.value.to_string();
            match c.state {
                ChoiceState::Wrong => label.red().strikethrough().to_string(),
                ChoiceState::Correct => label.green().bold().to_string(),
                ChoiceState::Untried if c.enabled => label,
                ChoiceState::Untried => label.dimmed().to_string(),
            }
        })
        .collect();
    println!("  [{}]", cells.join(" "));
}

fn print_feedback(feedback: &Feedback) {
    for line in &feedback.lines {
        match feedback.kind {
            FeedbackKind::Neutral => println!("  {line}"),
            FeedbackKind::Correct => println!("  {}", line.green()),
            FeedbackKind::Wrong => println!("  {}", line.red()),
        }
    }
}

fn print_stats(view: &StatsView) {
    let items: Vec<String> = view
        .items
        .iter()
        .map(|(kind, count)| format!("{kind}: {count}"))
        .collect();
    println!(
        "  {} {} | level {} | exp {}/{} | {}",
        view.avatar,
        view.name.bold(),
        view.level,
        view.experience,
        view.next_level_at,
        items.join(", ")
    );
}

fn details_table(rows: &[DetailRow]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Question", "Answer", "Time"]);
    for row in rows {
        table.add_row(vec![
            row.number.to_string(),
            row.question.clone(),
            row.answer.to_string(),
            row.time.clone(),
        ]);
    }
    table
}

fn print_results(view: &ResultsView) {
    println!();
    println!("  {} {}", "Session complete:".bold(), view.character);
    println!("  Topic: {}", view.topic);
    println!("  Score: {} | Time: {}", view.score.bold(), view.total_time);
    println!("  {}", view.rating);
    if !view.rows.is_empty() {
        println!("{}", details_table(&view.rows));
    }
}

fn print_history(view: &HistoryView, all_details: bool) {
    println!();
    println!("  {} {}", "History for".bold(), view.character.bold());
    if view.rows.is_empty() {
        println!("  {}", HistoryView::EMPTY_MESSAGE);
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Entry", "Date", "Topic", "Score", "Time"]);
    for row in &view.rows {
        table.add_row(vec![
            row.index.to_string(),
            row.date.clone(),
            row.topic.clone(),
            row.score.clone(),
            row.time.clone(),
        ]);
    }
    println!("{table}");

    for row in &view.rows {
        if (all_details || row.details_visible) && !row.details.is_empty() {
            println!("  Details for entry {}:", row.index);
            println!("{}", details_table(&row.details));
        }
    }
}
