use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

/// Keys that trigger an action, and a short description of the action.
pub(crate) type KeyBinding<'a> = (&'a [&'a str], &'a str);

/// A controls legend, one binding per line.
#[derive(Debug)]
pub(crate) struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
    block: Option<BlockWidget<'a>>,
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self {
            bindings,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        let content = self
            .bindings
            .iter()
            .map(|binding| binding_line(binding).width())
            .max()
            .unwrap_or(0);
        u16::try_from(content).unwrap_or(u16::MAX)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.bindings.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const KEY_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);

fn binding_line<'a>((keys, desc): &KeyBinding<'a>) -> Line<'a> {
    let mut spans = vec![];
    for (i, key) in keys.iter().copied().enumerate() {
        if i > 0 {
            spans.push(Span::styled("/", KEY_SEPARATOR_STYLE));
        }
        spans.push(Span::styled(key, KEY_STYLE));
    }
    spans.push(Span::from(" "));
    spans.push(Span::styled(*desc, DESCRIPTION_STYLE));
    Line::from(spans)
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows = area.rows();
        for (binding, row) in self.bindings.iter().zip(rows) {
            binding_line(binding).render(row, buf);
        }
    }
}
