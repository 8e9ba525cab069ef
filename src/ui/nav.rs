//! Top navigation bar: brand on the left, route links on the right.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::core::{content::NavBar, route::Route};

use super::page_widget::text_width;
use super::theme::Theme;

/// Horizontal padding at both ends of the bar.
const PAD: u16 = 2;

/// A clickable region of the nav bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTarget {
    pub area: Rect,
    pub label: &'static str,
    pub route: Option<Route>,
}

/// Brand first, then links right-aligned in order.  Only the first row of
/// `area` is used.
pub fn nav_targets(area: Rect, nav: &NavBar) -> Vec<NavTarget> {
    let mut targets = Vec::with_capacity(nav.links.len() + 1);
    if area.height == 0 {
        return targets;
    }
    let y = area.y;
    let left = area.x.saturating_add(PAD);
    targets.push(NavTarget {
        area: Rect::new(left, y, text_width(nav.brand) as u16, 1),
        label: nav.brand,
        route: nav.brand_target,
    });

    let mut right = area.right().saturating_sub(PAD);
    let mut links = Vec::with_capacity(nav.links.len());
    for &(label, route) in nav.links.iter().rev() {
        let w = text_width(label) as u16;
        right = right.saturating_sub(w);
        links.push(NavTarget {
            area: Rect::new(right, y, w, 1),
            label,
            route: Some(route),
        });
        right = right.saturating_sub(3);
    }
    links.reverse();
    targets.extend(links);
    targets
}

pub struct NavWidget<'a> {
    pub nav: &'a NavBar,
    /// Target under the mouse, drawn bold.
    pub hovered: Option<usize>,
}

impl<'a> Widget for NavWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::page_style());
        for (i, target) in nav_targets(area, self.nav).into_iter().enumerate() {
            let style = if self.hovered == Some(i) {
                Theme::nav_hover_style()
            } else {
                Theme::nav_style()
            };
            buf.set_stringn(
                target.area.x,
                target.area.y,
                target.label,
                target.area.width as usize,
                style,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content;

    #[test]
    fn home_bar_has_brand_and_about_link() {
        let nav = content::page(Route::Home).nav;
        let targets = nav_targets(Rect::new(0, 0, 60, 2), &nav);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].area.x, 2);
        assert_eq!(targets[0].route, None);
        assert_eq!(targets[1].label, "About Me");
        assert_eq!(targets[1].area.right(), 58);
        assert_eq!(targets[1].route, Some(Route::About));
    }

    #[test]
    fn about_brand_links_home() {
        let nav = content::page(Route::About).nav;
        let targets = nav_targets(Rect::new(0, 0, 60, 2), &nav);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].route, Some(Route::Home));
    }

    #[test]
    fn renders_labels() {
        let nav = content::page(Route::Home).nav;
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        NavWidget { nav: &nav, hovered: None }.render(area, &mut buf);
        let row: String = (0u16..40).map(|x| buf[(x, 0u16)].symbol().to_string()).collect();
        assert!(row.contains("Adriel De Vera"));
        assert!(row.ends_with("About Me  "));
    }
}
