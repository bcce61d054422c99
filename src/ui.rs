use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::domain::Focus;
use crate::model::{CardView, UIData};

// Fixed vertical layout: input boxes, count line, cards, status line.
// The model uses these to know how many cards fit the results area.
pub const INPUT_HEIGHT: u16 = 3;
pub const COUNT_HEIGHT: u16 = 1;
pub const STATUS_HEIGHT: u16 = 1;
pub const CARD_HEIGHT: u16 = 4;
pub const CHROME_HEIGHT: u16 = INPUT_HEIGHT + COUNT_HEIGHT + STATUS_HEIGHT;

pub struct SearchUI;

impl SearchUI {
    pub fn new() -> Self {
        Self
    }

    pub fn draw(&self, uidata: &UIData, frame: &mut Frame) {
        let [input_area, count_area, results_area, status_area] = Layout::vertical([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(COUNT_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .areas(frame.area());

        let [name_area, hash_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(input_area);

        self.draw_input(
            frame,
            name_area,
            " Name / Version ",
            &uidata.name_input.input,
            uidata.name_input.curser_pos,
            uidata.focus == Focus::Name,
        );
        self.draw_input(
            frame,
            hash_area,
            " SHA256 ",
            &uidata.hash_input.input,
            uidata.hash_input.curser_pos,
            uidata.focus == Focus::Hash,
        );

        self.draw_count(frame, count_area, uidata);

        if let Some(error) = &uidata.error {
            self.draw_error(frame, results_area, error);
        } else if uidata.cards.is_empty() {
            self.draw_empty_state(frame, results_area);
        } else {
            self.draw_cards(frame, results_area, uidata);
        }

        frame.render_widget(
            Paragraph::new(uidata.status_message.as_str()).dim(),
            status_area,
        );

        if uidata.show_help {
            self.draw_help(frame, uidata.help_text);
        }
    }

    fn draw_input(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        input: &str,
        curser_pos: usize,
        focused: bool,
    ) {
        let block = if focused {
            Block::bordered()
                .title(Line::from(title.bold()))
                .border_set(border::THICK)
                .border_style(Style::new().yellow())
        } else {
            Block::bordered().title(Line::from(title))
        };
        frame.render_widget(Paragraph::new(input).block(block), area);

        if focused && area.width > 2 {
            let x = area.x + 1 + std::cmp::min(curser_pos as u16, area.width - 2);
            frame.set_cursor_position(Position::new(x, area.y + 1));
        }
    }

    fn draw_count(&self, frame: &mut Frame, area: Rect, uidata: &UIData) {
        let count = Line::from(vec![
            Span::from(format!(" {} ", uidata.cards.len())).bold(),
            Span::from(format!("of {} records", uidata.total_count)).dim(),
            Span::from("   Esc clear | Tab switch | F1 help").dim(),
        ]);
        frame.render_widget(count, area);
    }

    fn draw_cards(&self, frame: &mut Frame, area: Rect, uidata: &UIData) {
        let visible = (area.height / CARD_HEIGHT) as usize;
        for (slot, (idx, card)) in uidata
            .cards
            .iter()
            .enumerate()
            .skip(uidata.scroll)
            .take(visible)
            .enumerate()
        {
            let card_area = Rect {
                x: area.x,
                y: area.y + slot as u16 * CARD_HEIGHT,
                width: area.width,
                height: CARD_HEIGHT,
            };
            self.draw_card(frame, card_area, card, idx == uidata.selected);
        }
    }

    fn draw_card(&self, frame: &mut Frame, area: Rect, card: &CardView, selected: bool) {
        let title = Line::from(vec![
            Span::from(format!(" {} ", card.name)).bold(),
            Span::from(format!("[{}] ", card.version)).blue(),
        ]);
        let block = if selected {
            Block::bordered()
                .title(title)
                .border_set(border::THICK)
                .border_style(Style::new().yellow())
        } else {
            Block::bordered().title(title)
        };

        let body = vec![
            Line::from(vec![
                Span::from("Released: ").dim(),
                Span::from(card.date.as_str()),
            ]),
            Line::from(vec![
                Span::from("SHA256: ").dim(),
                Span::from(card.sha256.as_str()).cyan(),
            ]),
        ];
        frame.render_widget(Paragraph::new(body).block(block), area);
    }

    fn draw_empty_state(&self, frame: &mut Frame, area: Rect) {
        let message = Paragraph::new(vec![
            Line::from(""),
            Line::from("No results found".bold()),
            Line::from("Try adjusting your search terms".dim()),
        ])
        .centered();
        frame.render_widget(message, area);
    }

    fn draw_error(&self, frame: &mut Frame, area: Rect, error: &str) {
        let banner = Paragraph::new(error)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title(Line::from(" Error ".bold()))
                    .border_style(Style::new().red()),
            )
            .red();
        frame.render_widget(banner, area);
    }

    fn draw_help(&self, frame: &mut Frame, help_text: &str) {
        let area = Self::centered_rect(frame.area(), 60, 14);
        frame.render_widget(Clear, area);
        let popup = Paragraph::new(help_text).block(
            Block::bordered()
                .title(Line::from(" Help ".bold()))
                .border_set(border::THICK),
        );
        frame.render_widget(popup, area);
    }

    fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
        let width = std::cmp::min(width, area.width);
        let height = std::cmp::min(height, area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }
}

impl Default for SearchUI {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputter::InputResult;
    use ratatui::{Terminal, backend::TestBackend};

    fn uidata_with_cards(cards: Vec<CardView>) -> UIData {
        UIData {
            name_input: InputResult::default(),
            hash_input: InputResult::default(),
            focus: Focus::Name,
            total_count: cards.len(),
            selected: 0,
            scroll: 0,
            error: None,
            show_help: false,
            help_text: crate::domain::HELP_TEXT,
            status_message: "ready".to_string(),
            cards,
        }
    }

    fn render_to_string(uidata: &UIData) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let ui = SearchUI::new();
        terminal.draw(|f| ui.draw(uidata, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_cards_with_escaped_fields() {
        let uidata = uidata_with_cards(vec![CardView {
            name: "&lt;script&gt;".to_string(),
            version: "1.0".to_string(),
            date: "January 5, 2024".to_string(),
            sha256: "abc123".to_string(),
        }]);
        let screen = render_to_string(&uidata);
        assert!(screen.contains("&lt;script&gt;"));
        assert!(screen.contains("January 5, 2024"));
        assert!(screen.contains("abc123"));
        assert!(!screen.contains("<script>"));
    }

    #[test]
    fn renders_empty_state() {
        let uidata = uidata_with_cards(Vec::new());
        let screen = render_to_string(&uidata);
        assert!(screen.contains("No results found"));
    }

    #[test]
    fn renders_error_banner_instead_of_results() {
        let mut uidata = uidata_with_cards(vec![CardView {
            name: "hidden".to_string(),
            version: "1.0".to_string(),
            date: "".to_string(),
            sha256: "abc".to_string(),
        }]);
        uidata.error = Some("Failed to load data. Restart to try again.".to_string());
        let screen = render_to_string(&uidata);
        assert!(screen.contains("Failed to load data"));
        assert!(!screen.contains("hidden"));
    }

    #[test]
    fn renders_help_overlay() {
        let mut uidata = uidata_with_cards(Vec::new());
        uidata.show_help = true;
        let screen = render_to_string(&uidata);
        assert!(screen.contains("Help"));
    }
}
