use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{app::App, clock::Clock, metrics::CharStatus, session::Phase};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub const TITLE: &str = "Speed Typing Test";
pub const START_HINT: &str = "Start typing to begin";

const HOW_TO_USE: [&str; 3] = [
    "1  Start typing the sentence shown above in the input field",
    "2  Your typing speed will be calculated automatically",
    "3  Press Tab for a new sentence to try again with a different one",
];

const KEYS_TYPING: &str = "(tab) new sentence  (ctrl+r) restart  (ctrl+w) delete word  (esc) quit";
const KEYS_COMPLETED: &str = "(n) new sentence  (r) restart  (esc) quit";

pub fn completion_message(wpm: u32, accuracy: u32) -> String {
    format!("You typed at {} WPM with {}% accuracy.", wpm, accuracy)
}

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let trial = &self.trial;

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default()
            .patch(bold_style)
            .fg(Color::Red)
            .bg(Color::Rgb(60, 20, 20));
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let text_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let sentence_lines =
            ((trial.reference().width() as f64 / text_width as f64).ceil() as u16).max(1);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),              // title + best
                Constraint::Length(1),              // padding
                Constraint::Length(sentence_lines), // reference sentence
                Constraint::Length(1),              // padding
                Constraint::Length(3),              // input field
                Constraint::Length(1),              // stats
                Constraint::Length(1),              // padding
                Constraint::Length(2),              // completion message
                Constraint::Min(0),
                Constraint::Length(HOW_TO_USE.len() as u16 + 3), // help
            ])
            .split(area);

        // header
        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(20)])
            .split(chunks[0]);

        Paragraph::new(Span::styled(
            TITLE,
            Style::default().patch(bold_style).fg(Color::Magenta),
        ))
        .render(header[0], buf);

        if trial.best_wpm() > 0 {
            Paragraph::new(Span::styled(
                format!("Best: {} WPM", trial.best_wpm()),
                Style::default().patch(bold_style).fg(Color::Yellow),
            ))
            .alignment(Alignment::Right)
            .render(header[1], buf);
        }

        // reference sentence, coloured by what has been typed
        let spans = trial
            .reference()
            .chars()
            .zip(trial.char_statuses())
            .map(|(c, status)| match status {
                CharStatus::Correct => Span::styled(c.to_string(), green_bold_style),
                CharStatus::Incorrect => Span::styled(
                    match c {
                        ' ' => "·".to_owned(),
                        c => c.to_string(),
                    },
                    red_bold_style,
                ),
                CharStatus::Pending => Span::styled(c.to_string(), dim_bold_style),
            })
            .collect::<Vec<Span>>();

        Paragraph::new(Line::from(spans))
            .alignment(if sentence_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        // input field
        let field_style = if self.field.is_enabled() {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut field_spans = vec![Span::raw(self.field.text().to_string())];
        if self.field.is_enabled() {
            field_spans.push(Span::styled(
                " ",
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        }
        if trial.phase() == Phase::NotStarted && self.field.is_empty() {
            field_spans.push(Span::styled(format!(" {}", START_HINT), italic_style));
        }

        Paragraph::new(Line::from(field_spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(field_style),
            )
            .render(chunks[4], buf);

        // stats
        let mut stats = Vec::new();
        if trial.phase() == Phase::InProgress {
            stats.push(Span::styled(
                format!("Accuracy: {}%", trial.accuracy()),
                Style::default().patch(bold_style).fg(Color::Blue),
            ));
            if let Some(ms) = trial.elapsed_ms(self.now_ms()) {
                stats.push(Span::styled(
                    format!("   {:.1}s", ms as f64 / 1000.0),
                    dim_bold_style,
                ));
            }
        }
        if trial.wpm() > 0 {
            stats.push(Span::styled(
                format!("Speed: {} WPM", trial.wpm()),
                green_bold_style,
            ));
        }
        Paragraph::new(Line::from(stats)).render(chunks[5], buf);

        if trial.has_finished() {
            Paragraph::new(vec![
                Line::from(Span::styled("Congratulations!", green_bold_style)),
                Line::from(completion_message(trial.wpm(), trial.accuracy())),
            ])
            .render(chunks[7], buf);
        }

        // help
        let mut help: Vec<Line> = HOW_TO_USE.iter().map(|l| Line::from(*l)).collect();
        help.push(Line::from(Span::styled(
            if trial.has_finished() {
                KEYS_COMPLETED
            } else {
                KEYS_TYPING
            },
            italic_style,
        )));

        Paragraph::new(help)
            .block(Block::default().borders(Borders::ALL).title("How to Use"))
            .wrap(Wrap { trim: true })
            .render(chunks[9], buf);
    }
}
