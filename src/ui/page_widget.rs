//! Custom Ratatui widget that renders a [`Page`] as a column of
//! scroll-reactive blocks over a dot-grid background.
//!
//! Layout happens in two steps.  [`PageLayout`] stacks the sections at a
//! given width and answers the one-time geometry query for each block.
//! [`placements`] then applies each block's live transform (translate /
//! scale) and the scroll offset to find where it lands on screen.  Opacity
//! is applied while copying the block onto the page.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::core::{
    block::{BlockId, GeometryProvider, ParallaxBlock},
    content::{Body, Page, Section},
    dot_grid::DotGrid,
    gradient::{OvalGradient, Rgb},
    transform::{BlockGeometry, BlockTransform},
};

use super::theme::Theme;

/// Widest a block gets, in columns.
pub const MAX_PAGE_WIDTH: u16 = 100;
/// Blank rows between blocks.
const BLOCK_GAP: u16 = 1;
const IMAGE_HEIGHT: u16 = 9;
const PHOTO_GRID_HEIGHT: u16 = 12;
/// Border plus padding on each side, plus room for the scale transform to
/// take a column from each edge without clipping text.
const TEXT_MARGIN: u16 = 6;

// ───────────────────────────────────────── text ──────────────

/// Display width of `s` in terminal columns.
pub fn text_width(s: &str) -> usize {
    Span::raw(s).width()
}

/// Greedy word wrap to `width` columns.  Words longer than a line are split.
/// Always returns at least one (possibly empty) line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            text_width(word)
        } else {
            text_width(&current) + 1 + text_width(word)
        };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        // Word on its own line; split it if it still does not fit.
        for ch in word.chars() {
            let mut buf = [0u8; 4];
            let ch_w = text_width(ch.encode_utf8(&mut buf));
            if !current.is_empty() && text_width(&current) + ch_w > width {
                lines.push(std::mem::take(&mut current));
            }
            current.push(ch);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// The rotating name as it should appear this frame.
#[derive(Debug, Clone, Copy)]
pub struct NameView<'a> {
    pub label: &'a str,
    pub fading: bool,
}

/// Text lines for a section at `width` text columns.  Image sections have
/// no text lines; they are drawn as placeholders.
pub fn section_lines(section: &Section, width: usize, name: NameView<'_>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(heading) = section.heading {
        lines.push(Line::styled(heading.to_string(), Theme::heading_style()));
        lines.push(Line::default());
    }

    match section.body {
        Body::Hero { lines: title, tagline } => {
            for t in title {
                lines.extend(
                    wrap(t, width)
                        .into_iter()
                        .map(|l| Line::styled(l, Theme::title_style())),
                );
            }
            lines.push(Line::styled(
                name.label.to_string(),
                Theme::rotating_name_style(name.fading),
            ));
            lines.push(Line::default());
            lines.extend(
                wrap(tagline, width)
                    .into_iter()
                    .map(|l| Line::styled(l, Theme::tagline_style())),
            );
        }
        Body::Bullets(items) => {
            for item in items {
                let wrapped = wrap(item, width.saturating_sub(2));
                for (i, l) in wrapped.into_iter().enumerate() {
                    let prefix = if i == 0 { "• " } else { "  " };
                    lines.push(Line::styled(format!("{prefix}{l}"), Theme::body_style()));
                }
            }
        }
        Body::Links(links) => {
            const COLUMNS: usize = 3;
            if width < 30 {
                for link in links {
                    lines.push(Line::styled(format!("↗ {}", link.label), Theme::link_style()));
                }
            } else {
                let per_col = links.len().div_ceil(COLUMNS);
                let col_w = width / COLUMNS;
                for row in 0..per_col {
                    let mut spans = Vec::new();
                    for col in 0..COLUMNS {
                        let Some(link) = links.get(col * per_col + row) else {
                            continue;
                        };
                        let label = format!("↗ {}", link.label);
                        let pad = col_w.saturating_sub(text_width(&label));
                        spans.push(Span::styled(label, Theme::link_style()));
                        spans.push(Span::raw(" ".repeat(pad)));
                    }
                    lines.push(Line::from(spans));
                }
            }
        }
        Body::Prose(text) => {
            lines.extend(
                wrap(text, width)
                    .into_iter()
                    .map(|l| Line::styled(l, Theme::body_style())),
            );
        }
        Body::Image { .. } | Body::Photos(_) => {}
    }
    lines
}

/// Rows a section occupies (border included) when its block is
/// `block_width` columns wide.
pub fn section_height(section: &Section, block_width: u16) -> u16 {
    match section.body {
        Body::Image { .. } => IMAGE_HEIGHT,
        Body::Photos(_) => PHOTO_GRID_HEIGHT,
        _ => {
            let text_w = block_width.saturating_sub(TEXT_MARGIN) as usize;
            // The rotating label always takes exactly one row, so any
            // label measures the same.
            let name = NameView { label: "", fading: false };
            let rows = section_lines(section, text_w, name).len();
            (rows as u16).saturating_add(2)
        }
    }
}

// ───────────────────────────────────────── layout ────────────

/// Resting position of one block, in rows from the top of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub top: u16,
    pub height: u16,
}

/// Sections stacked at a fixed width.
#[derive(Debug, Clone)]
pub struct PageLayout {
    /// Content area width this layout was computed for.
    pub area_width: u16,
    pub block_width: u16,
    pub slots: Vec<Slot>,
    pub total_rows: u16,
    row_px: f64,
}

impl PageLayout {
    pub fn compute(page: &Page, area_width: u16, row_px: f64) -> Self {
        let block_width = area_width.saturating_sub(4).clamp(1, MAX_PAGE_WIDTH);
        let mut slots = Vec::with_capacity(page.sections.len());
        let mut top: u16 = 0;
        for section in page.sections {
            let height = section_height(section, block_width);
            slots.push(Slot { top, height });
            top = top.saturating_add(height).saturating_add(BLOCK_GAP);
        }
        let total_rows = top.saturating_sub(BLOCK_GAP);
        Self {
            area_width,
            block_width,
            slots,
            total_rows,
            row_px,
        }
    }

    /// Largest useful scroll offset for a viewport of `viewport_rows`.
    pub fn max_scroll(&self, viewport_rows: u16) -> u16 {
        self.total_rows.saturating_sub(viewport_rows)
    }
}

impl GeometryProvider for PageLayout {
    fn geometry_of(&self, id: BlockId) -> Option<BlockGeometry> {
        self.slots.get(id).map(|slot| {
            BlockGeometry::new(
                f64::from(slot.top) * self.row_px,
                f64::from(slot.height) * self.row_px,
            )
        })
    }
}

/// Where a block lands on screen this frame.  `y` may lie above the area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub id: BlockId,
    pub x: u16,
    pub y: i32,
    pub width: u16,
    pub height: u16,
    pub transform: BlockTransform,
}

impl Placement {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        let row = i32::from(row);
        col >= self.x
            && col < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y + i32::from(self.height)
    }
}

/// Apply transforms and `scroll_rows` to every block's slot.
pub fn placements(
    area: Rect,
    layout: &PageLayout,
    blocks: &[ParallaxBlock],
    scroll_rows: f64,
) -> Vec<Placement> {
    if area.width == 0 {
        return Vec::new();
    }
    let scroll = scroll_rows.round() as i32;
    let row_px = if layout.row_px > 0.0 { layout.row_px } else { 1.0 };
    let block_width = layout.block_width.min(area.width);

    blocks
        .iter()
        .filter_map(|block| {
            let slot = layout.slots.get(block.id())?;
            let t = block.transform();
            let shift = (t.translate_y / row_px).round() as i32;
            let width = ((f64::from(block_width) * t.scale).round() as u16).max(1);
            let x = area.x + (area.width - block_width) / 2 + (block_width - width) / 2;
            Some(Placement {
                id: block.id(),
                x,
                y: i32::from(area.y) + i32::from(slot.top) + shift - scroll,
                width,
                height: slot.height,
                transform: t,
            })
        })
        .collect()
}

/// Topmost block under (`col`, `row`), if any.
pub fn block_at(placements: &[Placement], col: u16, row: u16) -> Option<BlockId> {
    placements
        .iter()
        .rev()
        .find(|p| p.contains(col, row))
        .map(|p| p.id)
}

// ───────────────────────────────────────── widget ────────────

/// Renders the scrolling part of a page.
pub struct PageWidget<'a> {
    page: &'a Page,
    layout: &'a PageLayout,
    blocks: &'a [ParallaxBlock],
    scroll_rows: f64,
    name: NameView<'a>,
    gradients: &'a [Option<OvalGradient>],
    hovered: Option<BlockId>,
    col_px: f64,
    dots: Option<(DotGrid, f64, u32)>,
}

impl<'a> PageWidget<'a> {
    pub fn new(
        page: &'a Page,
        layout: &'a PageLayout,
        blocks: &'a [ParallaxBlock],
        scroll_rows: f64,
        name: NameView<'a>,
    ) -> Self {
        Self {
            page,
            layout,
            blocks,
            scroll_rows,
            name,
            gradients: &[],
            hovered: None,
            col_px: 1.0,
            dots: None,
        }
    }

    /// Hover gradients, indexed by block id, and the column width in pixels
    /// used to size them.
    pub fn gradients(
        mut self,
        gradients: &'a [Option<OvalGradient>],
        hovered: Option<BlockId>,
        col_px: f64,
    ) -> Self {
        self.gradients = gradients;
        self.hovered = hovered;
        self.col_px = col_px;
        self
    }

    /// Dot-grid background with the column width in pixels and the drift
    /// phase.
    pub fn dots(mut self, grid: Option<DotGrid>, col_px: f64, phase: u32) -> Self {
        self.dots = grid.map(|g| (g, col_px, phase));
        self
    }

    fn render_dots(&self, area: Rect, buf: &mut Buffer) {
        let Some((grid, col_px, phase)) = self.dots else {
            return;
        };
        let scroll = self.scroll_rows.round().max(0.0) as u32;
        let glyph = grid.glyph().to_string();
        let fg = Theme::color(grid.dot_color);
        for y in area.top()..area.bottom() {
            let page_row = u32::from(y - area.y) + scroll;
            for x in area.left()..area.right() {
                let cell = &mut buf[(x, y)];
                if let Some(bg) = grid.background {
                    cell.set_bg(Theme::color(bg));
                }
                if grid.is_dot(u32::from(x - area.x), page_row, col_px, self.layout.row_px, phase) {
                    cell.set_symbol(&glyph).set_fg(fg);
                }
            }
        }
    }

    /// Draw one block into its own buffer at origin.
    fn render_block(&self, placement: &Placement, section: &Section) -> Buffer {
        let rect = Rect::new(0, 0, placement.width, placement.height);
        let mut scratch = Buffer::empty(rect);
        scratch.set_style(rect, Theme::page_style());

        if self.hovered == Some(placement.id) {
            if let Some(Some(gradient)) = self.gradients.get(placement.id) {
                paint_gradient(gradient, rect, (self.col_px, self.layout.row_px), &mut scratch);
            }
        }

        let frame = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style(placement.transform.is_active));
        let inner = frame.inner(rect);
        frame.render(rect, &mut scratch);

        let text_area = Rect::new(
            inner.x.saturating_add(1),
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        match section.body {
            Body::Image { alt } => render_placeholder(alt, text_area, &mut scratch),
            Body::Photos(alts) => render_photo_grid(alts, text_area, &mut scratch),
            _ => {
                let text_w = self.layout.block_width.saturating_sub(TEXT_MARGIN) as usize;
                for (i, line) in section_lines(section, text_w, self.name).iter().enumerate() {
                    let y = text_area.y + i as u16;
                    if y >= text_area.bottom() {
                        break;
                    }
                    scratch.set_line(text_area.x, y, line, text_area.width);
                }
            }
        }
        scratch
    }
}

impl<'a> Widget for PageWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::page_style());
        self.render_dots(area, buf);

        for placement in placements(area, self.layout, self.blocks, self.scroll_rows) {
            let Some(section) = self.page.sections.get(placement.id) else {
                continue;
            };
            let top = placement.y;
            let bottom = top + i32::from(placement.height);
            if bottom <= i32::from(area.top()) || top >= i32::from(area.bottom()) {
                continue;
            }

            let scratch = self.render_block(&placement, section);
            let opacity = placement.transform.opacity;
            for sy in 0..placement.height {
                let ty = top + i32::from(sy);
                if ty < i32::from(area.top()) || ty >= i32::from(area.bottom()) {
                    continue;
                }
                for sx in 0..placement.width {
                    let tx = placement.x + sx;
                    if tx >= area.right() {
                        break;
                    }
                    let mut cell = scratch[(sx, sy)].clone();
                    cell.fg = Theme::faded(cell.fg, opacity);
                    cell.bg = Theme::faded(cell.bg, opacity);
                    buf[(tx, ty as u16)] = cell;
                }
            }
        }
    }
}

/// Paint `gradient` centered on `rect`; `cell_px` is one cell's size in
/// virtual pixels.
fn paint_gradient(gradient: &OvalGradient, rect: Rect, cell_px: (f64, f64), buf: &mut Buffer) {
    let (col_px, row_px) = cell_px;
    let cx = f64::from(rect.width) / 2.0;
    let cy = f64::from(rect.height) / 2.0;
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            let dx = (f64::from(x - rect.x) + 0.5 - cx) * col_px;
            let dy = (f64::from(y - rect.y) + 0.5 - cy) * row_px;
            if let Some(Rgb(r, g, b)) = gradient.sample(dx, dy, Theme::BACKGROUND) {
                buf[(x, y)].set_bg(ratatui::style::Color::Rgb(r, g, b));
            }
        }
    }
}

fn render_placeholder(alt: &str, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let frame = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::placeholder_style());
    let inner = frame.inner(area);
    frame.render(area, buf);
    let mid = inner.height / 2;
    let text_rect = Rect::new(inner.x, inner.y + mid, inner.width, inner.height.min(1));
    Paragraph::new(format!("▣ {alt}"))
        .style(Theme::placeholder_style())
        .alignment(Alignment::Center)
        .render(text_rect, buf);
}

/// Bento grid: feature image on the left half, 2×2 on the right half.
fn render_photo_grid(alts: &[&str], area: Rect, buf: &mut Buffer) {
    let Some((feature, rest)) = alts.split_first() else {
        return;
    };
    let half = area.width / 2;
    render_placeholder(feature, Rect::new(area.x, area.y, half, area.height), buf);

    let cell_w = (area.width - half) / 2;
    let cell_h = area.height / 2;
    for (i, alt) in rest.iter().take(4).enumerate() {
        let col = (i % 2) as u16;
        let row = (i / 2) as u16;
        let rect = Rect::new(
            area.x + half + col * cell_w,
            area.y + row * cell_h,
            cell_w,
            cell_h,
        );
        render_placeholder(alt, rect, buf);
    }
}
