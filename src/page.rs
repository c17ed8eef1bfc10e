use std::ffi::CString;
use std::path::Path;
use std::process::Command;

use anyhow::Result;
use log::{info, warn};
use raylib::prelude::*;

use crate::avatar;
use crate::carousel::Carousel;
use crate::constants::*;
use crate::content::{SiteContent, Testimonial};
use crate::reveal::Reveal;
use crate::texture_loader::{load_texture_from_memory, load_texture_with_exif_rotation};
use crate::transition::{CardMotion, transition_spec};

const SECTION_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Hero = 0,
    Method,
    About,
    Services,
    Testimonials,
    Contact,
}

fn section_for_anchor(anchor: &str) -> Option<Section> {
    match anchor {
        "method" => Some(Section::Method),
        "about" => Some(Section::About),
        "services" => Some(Section::Services),
        "testimonials" => Some(Section::Testimonials),
        "contact" => Some(Section::Contact),
        _ => None,
    }
}

// Vertical extent of each section in page coordinates (y grows downward
// from the top of the page, independent of scrolling).
struct Layout {
    offsets: [f32; SECTION_COUNT],
    heights: [f32; SECTION_COUNT],
    total: f32,
}

const BODY_SIZE: i32 = 18;
const BODY_LINE: f32 = 27.0;
const FOOTER_HEIGHT: f32 = 90.0;
const CARD_AREA_HEIGHT: f32 = 320.0;

fn side_margin(sw: f32) -> f32 {
    ((sw - 960.0) * 0.5).max(32.0)
}

fn content_width(sw: f32) -> f32 {
    sw - 2.0 * side_margin(sw)
}

fn fade(color: Color, alpha: f32) -> Color {
    Color { a: (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8, ..color }
}

// raylib-rs only exposes default-font text measurement as a method on
// `RaylibHandle`, but the layout and rect helpers hold no handle. Wrap the
// C call instead; it reads the same default font.
fn measure_text(text: &str, font_size: i32) -> i32 {
    let Ok(text) = CString::new(text) else {
        return 0;
    };
    unsafe { raylib::ffi::MeasureText(text.as_ptr(), font_size) }
}

// Greedy word wrap against the default font.
fn wrap_text(text: &str, font_size: i32, max_width: i32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if !line.is_empty() && measure_text(&candidate, font_size) > max_width {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// The whole page view: static content, textures, and every piece of mutable
/// UI state (scroll position, menu flag, carousel, in-flight animations).
/// Nothing here is ambient; the main loop owns one `Page` and drives it.
pub struct Page {
    content: SiteContent,
    carousel: Carousel,
    motion: CardMotion,
    reveals: Vec<Reveal>,

    scroll: f32,
    scroll_target: f32,
    menu_open: bool,

    hero_poster: Option<Texture2D>,
    portrait: Option<Texture2D>,
    avatars: Vec<Option<Texture2D>>,
}

impl Page {
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        content: SiteContent,
        base: &Path,
        offline: bool,
    ) -> Result<Self> {
        let carousel = Carousel::new(content.testimonials.len())?;

        let hero_poster = content
            .hero
            .poster
            .clone()
            .and_then(|p| load_optional(rl, thread, &base.join(p)));
        let portrait = content
            .about
            .portrait
            .clone()
            .and_then(|p| load_optional(rl, thread, &base.join(p)));

        let avatars = if offline {
            info!("offline mode, drawing initials instead of avatars");
            content.testimonials.iter().map(|_| None).collect()
        } else {
            fetch_avatars(rl, thread, &content)
        };

        Ok(Self {
            content,
            carousel,
            motion: CardMotion::idle(),
            reveals: (0..SECTION_COUNT).map(|_| Reveal::new()).collect(),
            scroll: 0.0,
            scroll_target: 0.0,
            menu_open: false,
            hero_poster,
            portrait,
            avatars,
        })
    }

    // --- Per-Frame Update ---

    pub fn update(&mut self, dt: f32, sw: f32, sh: f32) {
        let layout = self.layout(sw, sh);

        self.scroll_target = self.scroll_target.clamp(0.0, (layout.total - sh).max(0.0));
        let t = (dt * SCROLL_SMOOTHING).min(1.0);
        self.scroll += (self.scroll_target - self.scroll) * t;
        if (self.scroll - self.scroll_target).abs() < 0.5 {
            self.scroll = self.scroll_target;
        }

        // Fire each section's reveal once it comes far enough into view.
        for (i, reveal) in self.reveals.iter_mut().enumerate() {
            if layout.offsets[i] < self.scroll + sh * REVEAL_AHEAD {
                reveal.trigger();
            }
            reveal.update(dt);
        }

        self.motion.update(dt);
    }

    // --- Input ---

    pub fn handle_input(&mut self, rl: &RaylibHandle, sw: f32, sh: f32) {
        let layout = self.layout(sw, sh);

        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 {
            self.scroll_target -= wheel * SCROLL_STEP;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_DOWN) {
            self.scroll_target += SCROLL_STEP * 2.0;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_UP) {
            self.scroll_target -= SCROLL_STEP * 2.0;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_PAGE_DOWN) {
            self.scroll_target += sh * 0.9;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_PAGE_UP) {
            self.scroll_target -= sh * 0.9;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_HOME) {
            self.scroll_target = 0.0;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_END) {
            self.scroll_target = layout.total;
        }
        self.scroll_target = self.scroll_target.clamp(0.0, (layout.total - sh).max(0.0));

        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            self.navigate(-1);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            self.navigate(1);
        }
        const DIGIT_KEYS: [KeyboardKey; 9] = [
            KeyboardKey::KEY_ONE,
            KeyboardKey::KEY_TWO,
            KeyboardKey::KEY_THREE,
            KeyboardKey::KEY_FOUR,
            KeyboardKey::KEY_FIVE,
            KeyboardKey::KEY_SIX,
            KeyboardKey::KEY_SEVEN,
            KeyboardKey::KEY_EIGHT,
            KeyboardKey::KEY_NINE,
        ];
        for (i, key) in DIGIT_KEYS.iter().enumerate().take(self.carousel.len()) {
            if rl.is_key_pressed(*key) {
                self.jump(i);
            }
        }

        if rl.is_key_pressed(KeyboardKey::KEY_M) {
            self.menu_open = !self.menu_open;
        }

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            self.handle_click(rl.get_mouse_position(), &layout, sw);
        }
    }

    fn handle_click(&mut self, mouse: Vector2, layout: &Layout, sw: f32) {
        // Screen-fixed chrome first: it overlays the scrolled content.
        if sw < NARROW_BREAKPOINT && hamburger_rect(sw).check_collision_point_rec(mouse) {
            self.menu_open = !self.menu_open;
            return;
        }
        if self.menu_open {
            for (rect, section) in self.menu_rects(sw) {
                if rect.check_collision_point_rec(mouse) {
                    self.scroll_to(section, layout);
                    self.menu_open = false;
                    return;
                }
            }
            // A click outside the panel dismisses it.
            self.menu_open = false;
            return;
        }
        if sw >= NARROW_BREAKPOINT {
            for (rect, section, _) in self.header_nav_rects(sw) {
                if rect.check_collision_point_rec(mouse) {
                    self.scroll_to(section, layout);
                    return;
                }
            }
            if self.header_cta_rect(sw).check_collision_point_rec(mouse) {
                self.scroll_to(Section::Contact, layout);
                return;
            }
        }

        // Scrolled content: hit-test in page coordinates.
        let page_point = Vector2::new(mouse.x, mouse.y + self.scroll);

        if self.hero_cta_rect(sw, layout).check_collision_point_rec(page_point) {
            self.scroll_to(Section::Services, layout);
            return;
        }

        let (prev, next, dots) = self.carousel_controls(sw, layout);
        if prev.check_collision_point_rec(page_point) {
            self.navigate(-1);
            return;
        }
        if next.check_collision_point_rec(page_point) {
            self.navigate(1);
            return;
        }
        for (i, dot) in dots.iter().enumerate() {
            if dot.check_collision_point_rec(page_point) {
                self.jump(i);
                return;
            }
        }

        if self.contact_cta_rect(sw, layout).check_collision_point_rec(page_point) {
            open_mailto(&self.content.site.contact_email);
        }
    }

    fn scroll_to(&mut self, section: Section, layout: &Layout) {
        let offset = layout.offsets[section as usize];
        self.scroll_target = (offset - HEADER_HEIGHT).max(0.0);
    }

    // --- Carousel Navigation ---

    fn navigate(&mut self, step: i64) {
        let from = self.carousel.display_index();
        let from_id = self.content.testimonials[from].id.clone();
        self.carousel.paginate(step);
        let to = self.carousel.display_index();
        let spec = transition_spec(from, to, self.carousel.direction());
        self.motion.begin(from_id, &spec);
    }

    fn jump(&mut self, target: usize) {
        let from = self.carousel.display_index();
        let from_id = self.content.testimonials[from].id.clone();
        self.carousel.jump_to(target);
        let to = self.carousel.display_index();
        let spec = transition_spec(from, to, self.carousel.direction());
        self.motion.begin(from_id, &spec);
    }

    // --- Layout ---

    fn layout(&self, sw: f32, sh: f32) -> Layout {
        let cw = content_width(sw);
        let col_w = (cw * 0.5 - 24.0) as i32;

        let hero_h = (sh * 0.85).max(420.0);

        let method = &self.content.method;
        let method_text_lines: usize = method
            .paragraphs
            .iter()
            .map(|p| wrap_text(p, BODY_SIZE, col_w).len() + 1)
            .sum();
        let method_text_h = 56.0 + method_text_lines as f32 * BODY_LINE;
        let quote_lines = wrap_text(&method.quote, 24, col_w - 48).len();
        let quote_h = 110.0 + quote_lines as f32 * 34.0;
        let method_h = method_text_h.max(quote_h) + 140.0;

        let about = &self.content.about;
        let about_text_lines: usize = about
            .paragraphs
            .iter()
            .map(|p| wrap_text(p, BODY_SIZE, col_w).len() + 1)
            .sum();
        let about_text_h = 96.0 + about_text_lines as f32 * BODY_LINE;
        let portrait_h = if self.portrait.is_some() { 380.0 } else { 0.0 };
        let about_h = about_text_h.max(portrait_h) + 140.0;

        let services_h = 140.0
            + self.service_rows() as f32 * (self.service_card_height(sw) + 24.0);

        let testimonials_h = 140.0 + CARD_AREA_HEIGHT + 70.0;
        let contact_h = 320.0;

        let heights = [hero_h, method_h, about_h, services_h, testimonials_h, contact_h];
        let mut offsets = [0.0; SECTION_COUNT];
        let mut y = 0.0;
        for i in 0..SECTION_COUNT {
            offsets[i] = y;
            y += heights[i];
        }
        Layout { offsets, heights, total: y + FOOTER_HEIGHT }
    }

    fn service_rows(&self) -> usize {
        self.content.services.len().div_ceil(2)
    }

    fn service_card_height(&self, sw: f32) -> f32 {
        let card_w = (content_width(sw) / 2.0 - 20.0) as i32;
        let desc_lines = self
            .content
            .services
            .iter()
            .map(|s| wrap_text(&s.description, BODY_SIZE, card_w - 48).len())
            .max()
            .unwrap_or(0);
        104.0 + desc_lines as f32 * BODY_LINE
    }

    // --- Interactive Rects (shared by hit-testing and drawing) ---

    fn header_nav_rects(&self, sw: f32) -> Vec<(Rectangle, Section, &str)> {
        let mut rects = Vec::new();
        let mut x = sw - side_margin(sw) - 170.0; // room for the header pill
        for link in self.content.nav.iter().rev() {
            let Some(section) = section_for_anchor(&link.section) else {
                continue;
            };
            let w = measure_text(&link.label, 16) as f32 + 28.0;
            x -= w;
            rects.push((Rectangle::new(x, 0.0, w, HEADER_HEIGHT), section, link.label.as_str()));
        }
        rects
    }

    fn header_cta_rect(&self, sw: f32) -> Rectangle {
        let w = measure_text(&self.content.site.nav_cta_label, 16) as f32 + 48.0;
        Rectangle::new(sw - side_margin(sw) - w, 14.0, w, 36.0)
    }

    fn menu_rects(&self, sw: f32) -> Vec<(Rectangle, Section)> {
        let mut rects = Vec::new();
        let mut y = HEADER_HEIGHT;
        for link in &self.content.nav {
            if let Some(section) = section_for_anchor(&link.section) {
                rects.push((Rectangle::new(0.0, y, sw, 44.0), section));
                y += 44.0;
            }
        }
        // The CTA entry at the bottom of the panel goes to the contact block.
        rects.push((Rectangle::new(0.0, y, sw, 52.0), Section::Contact));
        rects
    }

    fn hero_cta_rect(&self, sw: f32, layout: &Layout) -> Rectangle {
        let w = measure_text(&self.content.hero.cta_label, 18) as f32 + 72.0;
        let y = layout.heights[Section::Hero as usize] * 0.68;
        Rectangle::new((sw - w) * 0.5, y, w, 50.0)
    }

    fn carousel_controls(&self, sw: f32, layout: &Layout) -> (Rectangle, Rectangle, Vec<Rectangle>) {
        let top = layout.offsets[Section::Testimonials as usize] + 140.0;
        let card_w = content_width(sw).min(680.0);
        let center_x = sw * 0.5;

        let prev = Rectangle::new(center_x - card_w * 0.5 - 64.0, top + 130.0, 44.0, 44.0);
        let next = Rectangle::new(center_x + card_w * 0.5 + 20.0, top + 130.0, 44.0, 44.0);

        let n = self.content.testimonials.len();
        let dot_span = 28.0;
        let dots_y = top + CARD_AREA_HEIGHT + 16.0;
        let first_x = center_x - (n as f32 - 1.0) * dot_span * 0.5 - 10.0;
        let dots = (0..n)
            .map(|i| Rectangle::new(first_x + i as f32 * dot_span, dots_y, 20.0, 20.0))
            .collect();

        (prev, next, dots)
    }

    fn contact_cta_rect(&self, sw: f32, layout: &Layout) -> Rectangle {
        let w = measure_text(&self.content.contact.cta_label, 18) as f32 + 80.0;
        let y = layout.offsets[Section::Contact as usize]
            + layout.heights[Section::Contact as usize]
            - 110.0;
        Rectangle::new((sw - w) * 0.5, y, w, 50.0)
    }

    // --- Drawing ---

    pub fn draw(&self, d: &mut RaylibDrawHandle, sw: f32, sh: f32) {
        let layout = self.layout(sw, sh);
        d.clear_background(PAPER);

        self.draw_hero(d, sw, sh, &layout);
        self.draw_method(d, sw, sh, &layout);
        self.draw_about(d, sw, sh, &layout);
        self.draw_services(d, sw, sh, &layout);
        self.draw_testimonials(d, sw, sh, &layout);
        self.draw_contact(d, sw, sh, &layout);
        self.draw_footer(d, sw, sh, &layout);

        self.draw_header(d, sw);
        if self.menu_open {
            self.draw_menu(d, sw);
        }
    }

    // Returns the on-screen top of a section (reveal rise applied), or None
    // when the section is entirely outside the viewport.
    fn section_top(&self, section: Section, layout: &Layout, sh: f32) -> Option<(f32, f32)> {
        let i = section as usize;
        let alpha = self.reveals[i].alpha();
        let y = layout.offsets[i] - self.scroll + self.reveals[i].rise();
        if y > sh || y + layout.heights[i] < 0.0 || alpha <= 0.0 {
            None
        } else {
            Some((y, alpha))
        }
    }

    fn draw_header(&self, d: &mut RaylibDrawHandle, sw: f32) {
        d.draw_rectangle(0, 0, sw as i32, HEADER_HEIGHT as i32, PAPER);
        d.draw_line_ex(
            Vector2::new(0.0, HEADER_HEIGHT),
            Vector2::new(sw, HEADER_HEIGHT),
            1.0,
            HAIRLINE,
        );

        let margin = side_margin(sw) as i32;
        d.draw_text(&self.content.site.name, margin, 20, 22, INK);

        if sw >= NARROW_BREAKPOINT {
            // Labels live in the same rects as hit-testing so the two cannot
            // drift apart.
            for (rect, _, label) in self.header_nav_rects(sw) {
                d.draw_text(label, (rect.x + 14.0) as i32, 24, 16, SLATE);
            }
            let pill = self.header_cta_rect(sw);
            d.draw_rectangle_rounded(pill, 1.0, 12, INDIGO);
            d.draw_text(
                &self.content.site.nav_cta_label,
                (pill.x + 24.0) as i32,
                (pill.y + 10.0) as i32,
                16,
                PAPER,
            );
        } else {
            let rect = hamburger_rect(sw);
            let x = rect.x as i32;
            for row in 0..3 {
                d.draw_rectangle(x, rect.y as i32 + 6 + row * 9, 24, 3, INK);
            }
        }
    }

    fn draw_menu(&self, d: &mut RaylibDrawHandle, sw: f32) {
        let rects = self.menu_rects(sw);
        let panel_h: f32 = rects.iter().map(|(r, _)| r.height).sum::<f32>() + 16.0;
        d.draw_rectangle(0, HEADER_HEIGHT as i32, sw as i32, panel_h as i32, PAPER);
        d.draw_line_ex(
            Vector2::new(0.0, HEADER_HEIGHT + panel_h),
            Vector2::new(sw, HEADER_HEIGHT + panel_h),
            1.0,
            HAIRLINE,
        );

        let margin = side_margin(sw) as i32;
        let nav_labels: Vec<&str> = self
            .content
            .nav
            .iter()
            .filter(|l| section_for_anchor(&l.section).is_some())
            .map(|l| l.label.as_str())
            .collect();
        for (i, (rect, _)) in rects.iter().enumerate() {
            if i < nav_labels.len() {
                d.draw_text(nav_labels[i], margin, (rect.y + 13.0) as i32, 16, SLATE);
            } else {
                let pill = Rectangle::new(rect.x + side_margin(sw), rect.y + 4.0, sw - 2.0 * side_margin(sw), 40.0);
                d.draw_rectangle_rounded(pill, 1.0, 12, INDIGO);
                let label = &self.content.site.nav_cta_label;
                let tx = pill.x + (pill.width - measure_text(label, 16) as f32) * 0.5;
                d.draw_text(label, tx as i32, (pill.y + 12.0) as i32, 16, PAPER);
            }
        }
    }

    fn draw_hero(&self, d: &mut RaylibDrawHandle, sw: f32, sh: f32, layout: &Layout) {
        let Some((y, alpha)) = self.section_top(Section::Hero, layout, sh) else {
            return;
        };
        let h = layout.heights[Section::Hero as usize];
        let band = Rectangle::new(0.0, y, sw, h);

        if let Some(poster) = &self.hero_poster {
            draw_texture_cover(d, poster, band, fade(Color::WHITE, alpha));
        } else {
            d.draw_rectangle_rec(band, fade(INK, alpha));
        }
        // Dark scrim so the copy stays readable over the poster.
        d.draw_rectangle_rec(band, fade(Color { r: 0, g: 0, b: 0, a: 128 }, alpha));

        let hero = &self.content.hero;
        let mut ty = y + h * 0.35;
        for line in wrap_text(&hero.title, 44, (sw * 0.8) as i32) {
            let tx = (sw - measure_text(&line, 44) as f32) * 0.5;
            d.draw_text(&line, tx as i32, ty as i32, 44, fade(PAPER, alpha));
            ty += 54.0;
        }
        ty += 12.0;
        for line in wrap_text(&hero.subtitle, 20, (sw * 0.6) as i32) {
            let tx = (sw - measure_text(&line, 20) as f32) * 0.5;
            d.draw_text(&line, tx as i32, ty as i32, 20, fade(SLATE_FAINT, alpha));
            ty += 30.0;
        }

        let mut cta = self.hero_cta_rect(sw, layout);
        cta.y = cta.y - self.scroll + self.reveals[Section::Hero as usize].rise();
        d.draw_rectangle_rounded(cta, 1.0, 12, fade(INDIGO, alpha));
        let tx = cta.x + (cta.width - measure_text(&hero.cta_label, 18) as f32) * 0.5;
        d.draw_text(&hero.cta_label, tx as i32, (cta.y + 16.0) as i32, 18, fade(PAPER, alpha));
    }

    fn draw_method(&self, d: &mut RaylibDrawHandle, sw: f32, sh: f32, layout: &Layout) {
        let Some((y, alpha)) = self.section_top(Section::Method, layout, sh) else {
            return;
        };
        let margin = side_margin(sw);
        let cw = content_width(sw);
        let col_w = cw * 0.5 - 24.0;
        let method = &self.content.method;

        draw_divider(d, sw, y + 30.0, alpha);

        let mut ty = y + 90.0;
        d.draw_text(&method.heading, margin as i32, ty as i32, 32, fade(INK, alpha));
        ty += 56.0;
        for paragraph in &method.paragraphs {
            for line in wrap_text(paragraph, BODY_SIZE, col_w as i32) {
                d.draw_text(&line, margin as i32, ty as i32, BODY_SIZE, fade(SLATE, alpha));
                ty += BODY_LINE;
            }
            ty += BODY_LINE;
        }

        // Pull quote card on the right column.
        let quote_lines = wrap_text(&method.quote, 24, (col_w - 48.0) as i32);
        let box_h = 110.0 + quote_lines.len() as f32 * 34.0;
        let quote_box = Rectangle::new(margin + cw * 0.5 + 24.0, y + 90.0, col_w, box_h);
        d.draw_rectangle_rounded(quote_box, 0.08, 8, fade(PAPER_TINT, alpha));
        let mut qy = quote_box.y + 36.0;
        for line in &quote_lines {
            d.draw_text(line, (quote_box.x + 24.0) as i32, qy as i32, 24, fade(SLATE, alpha));
            qy += 34.0;
        }
        let attribution = format!("- {}", method.quote_author);
        d.draw_text(&attribution, (quote_box.x + 24.0) as i32, (qy + 12.0) as i32, 18, fade(SLATE_SOFT, alpha));
    }

    fn draw_about(&self, d: &mut RaylibDrawHandle, sw: f32, sh: f32, layout: &Layout) {
        let Some((y, alpha)) = self.section_top(Section::About, layout, sh) else {
            return;
        };
        let margin = side_margin(sw);
        let cw = content_width(sw);
        let col_w = cw * 0.5 - 24.0;
        let h = layout.heights[Section::About as usize];
        let about = &self.content.about;

        d.draw_rectangle(0, y as i32, sw as i32, h as i32, fade(PAPER_TINT, alpha));

        let mut ty = y + 70.0;
        d.draw_text(&about.heading, margin as i32, ty as i32, 32, fade(INK, alpha));
        ty += 56.0;
        for paragraph in &about.paragraphs {
            for line in wrap_text(paragraph, BODY_SIZE, col_w as i32) {
                d.draw_text(&line, margin as i32, ty as i32, BODY_SIZE, fade(SLATE, alpha));
                ty += BODY_LINE;
            }
            ty += BODY_LINE;
        }
        d.draw_text(&about.link_label, margin as i32, ty as i32, BODY_SIZE, fade(INDIGO, alpha));

        if let Some(portrait) = &self.portrait {
            let frame = Rectangle::new(margin + cw * 0.5 + 24.0, y + 70.0, col_w, h - 140.0);
            draw_texture_cover(d, portrait, frame, fade(Color::WHITE, alpha));
        }
    }

    fn draw_services(&self, d: &mut RaylibDrawHandle, sw: f32, sh: f32, layout: &Layout) {
        let Some((y, alpha)) = self.section_top(Section::Services, layout, sh) else {
            return;
        };
        let margin = side_margin(sw);
        let cw = content_width(sw);
        let services = &self.content.services;
        let card_w = cw / 2.0 - 20.0;
        let card_h = self.service_card_height(sw);

        // Section heading: reuse the nav label pointing here when available.
        let heading_text = self
            .content
            .nav
            .iter()
            .find(|l| l.section == "services")
            .map(|l| l.label.as_str())
            .unwrap_or("Servicios");
        let hx = (sw - measure_text(heading_text, 32) as f32) * 0.5;
        d.draw_text(heading_text, hx as i32, (y + 60.0) as i32, 32, fade(INK, alpha));

        for (i, service) in services.iter().enumerate() {
            let col = (i % 2) as f32;
            let row = (i / 2) as f32;
            let card = Rectangle::new(
                margin + col * (card_w + 40.0),
                y + 140.0 + row * (card_h + 24.0),
                card_w,
                card_h,
            );
            d.draw_rectangle_rounded(card, 0.06, 8, fade(PAPER, alpha));
            d.draw_rectangle_rounded_lines(card, 0.06, 8, fade(HAIRLINE, alpha));

            let x = (card.x + 24.0) as i32;
            let mut ty = card.y + 24.0;
            d.draw_text(&service.title, x, ty as i32, 22, fade(INK, alpha));
            ty += 40.0;
            for line in wrap_text(&service.description, BODY_SIZE, (card_w - 48.0) as i32) {
                d.draw_text(&line, x, ty as i32, BODY_SIZE, fade(SLATE, alpha));
                ty += BODY_LINE;
            }
            let link = format!("{} \u{2192}", service.link_label);
            d.draw_text(&link, x, (card.y + card_h - 36.0) as i32, BODY_SIZE, fade(INDIGO, alpha));
        }
    }

    fn draw_testimonials(&self, d: &mut RaylibDrawHandle, sw: f32, sh: f32, layout: &Layout) {
        let Some((y, alpha)) = self.section_top(Section::Testimonials, layout, sh) else {
            return;
        };

        draw_divider(d, sw, y + 20.0, alpha);

        let heading_text = self
            .content
            .nav
            .iter()
            .find(|l| l.section == "testimonials")
            .map(|l| l.label.as_str())
            .unwrap_or("Testimonios");
        let hx = (sw - measure_text(heading_text, 32) as f32) * 0.5;
        d.draw_text(heading_text, hx as i32, (y + 70.0) as i32, 32, fade(INK, alpha));

        let card_top = y + 140.0;
        let card_w = content_width(sw).min(680.0);
        let center_x = sw * 0.5;

        // Outgoing card first so the incoming one lands on top.
        if let Some((id, out_x, out_alpha)) = self.motion.outgoing() {
            if let Some(testimonial) = self.content.testimonial_by_id(id) {
                let idx = self
                    .content
                    .testimonials
                    .iter()
                    .position(|t| t.id == id)
                    .unwrap_or(0);
                self.draw_card(
                    d,
                    testimonial,
                    self.avatars.get(idx).and_then(|a| a.as_ref()),
                    center_x + out_x * card_w * 1.2,
                    card_top,
                    card_w,
                    alpha * out_alpha,
                );
            }
        }

        let current = self.carousel.display_index();
        let (in_x, in_alpha) = self.motion.incoming();
        self.draw_card(
            d,
            &self.content.testimonials[current],
            self.avatars.get(current).and_then(|a| a.as_ref()),
            center_x + in_x * card_w * 1.2,
            card_top,
            card_w,
            alpha * in_alpha,
        );

        // Chevrons and dots sit above the sliding cards.
        let (prev, next, dots) = self.carousel_controls(sw, layout);
        let rise = self.reveals[Section::Testimonials as usize].rise();
        draw_chevron(d, offset_rect(prev, rise - self.scroll), true, alpha);
        draw_chevron(d, offset_rect(next, rise - self.scroll), false, alpha);
        for (i, dot) in dots.iter().enumerate() {
            let r = offset_rect(*dot, rise - self.scroll);
            let center = Vector2::new(r.x + r.width * 0.5, r.y + r.height * 0.5);
            if i == current {
                d.draw_circle_v(center, 7.0, fade(INDIGO, alpha));
            } else {
                d.draw_circle_v(center, 5.0, fade(SLATE_FAINT, alpha));
            }
        }
    }

    fn draw_card(
        &self,
        d: &mut RaylibDrawHandle,
        testimonial: &Testimonial,
        avatar_texture: Option<&Texture2D>,
        center_x: f32,
        top: f32,
        width: f32,
        alpha: f32,
    ) {
        if alpha <= 0.0 {
            return;
        }

        let avatar_r = 44.0;
        let avatar_center = Vector2::new(center_x, top + avatar_r + 8.0);
        match avatar_texture {
            Some(texture) => {
                let dest = Rectangle::new(
                    avatar_center.x - avatar_r,
                    avatar_center.y - avatar_r,
                    avatar_r * 2.0,
                    avatar_r * 2.0,
                );
                draw_texture_cover(d, texture, dest, fade(Color::WHITE, alpha));
                d.draw_ring(avatar_center, avatar_r, avatar_r + 3.0, 0.0, 360.0, 48, fade(INDIGO_PALE, alpha));
            }
            None => {
                d.draw_circle_v(avatar_center, avatar_r, fade(INDIGO_PALE, alpha));
                let text = avatar::initials(&testimonial.author);
                let tx = avatar_center.x - measure_text(&text, 30) as f32 * 0.5;
                d.draw_text(&text, tx as i32, (avatar_center.y - 15.0) as i32, 30, fade(INDIGO, alpha));
            }
        }

        let quoted = format!("\u{201c}{}\u{201d}", testimonial.text);
        let mut ty = top + avatar_r * 2.0 + 36.0;
        for line in wrap_text(&quoted, 20, (width - 80.0) as i32) {
            let tx = center_x - measure_text(&line, 20) as f32 * 0.5;
            d.draw_text(&line, tx as i32, ty as i32, 20, fade(SLATE, alpha));
            ty += 30.0;
        }

        ty += 14.0;
        let ax = center_x - measure_text(&testimonial.author, 20) as f32 * 0.5;
        d.draw_text(&testimonial.author, ax as i32, ty as i32, 20, fade(INK, alpha));
        ty += 28.0;
        let rx = center_x - measure_text(&testimonial.role, 14) as f32 * 0.5;
        d.draw_text(&testimonial.role, rx as i32, ty as i32, 14, fade(SLATE_SOFT, alpha));
    }

    fn draw_contact(&self, d: &mut RaylibDrawHandle, sw: f32, sh: f32, layout: &Layout) {
        let Some((y, alpha)) = self.section_top(Section::Contact, layout, sh) else {
            return;
        };
        let h = layout.heights[Section::Contact as usize];
        let contact = &self.content.contact;

        d.draw_rectangle(0, y as i32, sw as i32, h as i32, fade(PAPER_TINT, alpha));

        let hx = (sw - measure_text(&contact.heading, 32) as f32) * 0.5;
        d.draw_text(&contact.heading, hx as i32, (y + 60.0) as i32, 32, fade(INK, alpha));

        let mut ty = y + 120.0;
        for line in wrap_text(&contact.body, 20, (sw * 0.55) as i32) {
            let tx = (sw - measure_text(&line, 20) as f32) * 0.5;
            d.draw_text(&line, tx as i32, ty as i32, 20, fade(SLATE, alpha));
            ty += 30.0;
        }

        let mut cta = self.contact_cta_rect(sw, layout);
        cta.y = cta.y - self.scroll + self.reveals[Section::Contact as usize].rise();
        d.draw_rectangle_rounded(cta, 1.0, 12, fade(INDIGO, alpha));
        let tx = cta.x + (cta.width - measure_text(&contact.cta_label, 18) as f32) * 0.5;
        d.draw_text(&contact.cta_label, tx as i32, (cta.y + 16.0) as i32, 18, fade(PAPER, alpha));
    }

    fn draw_footer(&self, d: &mut RaylibDrawHandle, sw: f32, sh: f32, layout: &Layout) {
        let y = layout.total - FOOTER_HEIGHT - self.scroll;
        if y > sh {
            return;
        }
        let margin = side_margin(sw);
        d.draw_line_ex(Vector2::new(0.0, y), Vector2::new(sw, y), 1.0, HAIRLINE);

        let footer = &self.content.footer;
        d.draw_text(&footer.copyright, margin as i32, (y + 38.0) as i32, 14, SLATE_SOFT);

        let mut x = sw - margin;
        for label in footer.legal.iter().rev() {
            x -= measure_text(label, 14) as f32 + 24.0;
            d.draw_text(label, x as i32, (y + 38.0) as i32, 14, SLATE_SOFT);
        }
    }
}

fn hamburger_rect(sw: f32) -> Rectangle {
    Rectangle::new(sw - side_margin(sw) - 24.0, 16.0, 24.0, 32.0)
}

fn offset_rect(rect: Rectangle, dy: f32) -> Rectangle {
    Rectangle::new(rect.x, rect.y + dy, rect.width, rect.height)
}

fn draw_divider(d: &mut RaylibDrawHandle, sw: f32, y: f32, alpha: f32) {
    let half = 48.0;
    d.draw_line_ex(
        Vector2::new(sw * 0.5 - half, y),
        Vector2::new(sw * 0.5 + half, y),
        1.0,
        fade(HAIRLINE, alpha),
    );
}

fn draw_chevron(d: &mut RaylibDrawHandle, rect: Rectangle, left: bool, alpha: f32) {
    let center = Vector2::new(rect.x + rect.width * 0.5, rect.y + rect.height * 0.5);
    d.draw_circle_v(center, rect.width * 0.5, fade(INDIGO_PALE, alpha));
    let glyph = if left { "<" } else { ">" };
    let tx = center.x - measure_text(glyph, 24) as f32 * 0.5;
    d.draw_text(glyph, tx as i32, (center.y - 12.0) as i32, 24, fade(INDIGO, alpha));
}

// Scale-to-cover: crop the source so the texture fills `dest` without
// distortion, the way the site's images behave.
fn draw_texture_cover(d: &mut RaylibDrawHandle, texture: &Texture2D, dest: Rectangle, tint: Color) {
    let tw = texture.width() as f32;
    let th = texture.height() as f32;
    let dest_aspect = dest.width / dest.height;
    let src = if tw / th > dest_aspect {
        let crop_w = th * dest_aspect;
        Rectangle::new((tw - crop_w) * 0.5, 0.0, crop_w, th)
    } else {
        let crop_h = tw / dest_aspect;
        Rectangle::new(0.0, (th - crop_h) * 0.5, tw, crop_h)
    };
    d.draw_texture_pro(texture, src, dest, Vector2::zero(), 0.0, tint);
}

fn load_optional(rl: &mut RaylibHandle, thread: &RaylibThread, path: &Path) -> Option<Texture2D> {
    match load_texture_with_exif_rotation(rl, thread, path) {
        Ok(texture) => Some(texture),
        Err(e) => {
            warn!("skipping image {}: {e:#}", path.display());
            None
        }
    }
}

fn fetch_avatars(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    content: &SiteContent,
) -> Vec<Option<Texture2D>> {
    let client = match avatar::make_client() {
        Ok(client) => client,
        Err(e) => {
            warn!("avatar fetching disabled: {e:#}");
            return content.testimonials.iter().map(|_| None).collect();
        }
    };
    content
        .testimonials
        .iter()
        .map(|t| {
            match avatar::fetch_avatar(&client, &t.contact, AVATAR_SIZE)
                .and_then(|bytes| load_texture_from_memory(rl, thread, &bytes))
            {
                Ok(texture) => Some(texture),
                Err(e) => {
                    warn!("avatar for {} unavailable, drawing initials: {e:#}", t.author);
                    None
                }
            }
        })
        .collect()
}

fn open_mailto(email: &str) {
    let uri = format!("mailto:{email}");
    info!("opening {uri}");
    #[cfg(target_os = "macos")]
    const OPENER: &str = "open";
    #[cfg(target_os = "windows")]
    const OPENER: &str = "explorer";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    const OPENER: &str = "xdg-open";
    if let Err(e) = Command::new(OPENER).arg(&uri).spawn() {
        warn!("could not open mail client: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These paths never reach the C measurement call, so they are safe to
    // exercise without a window.

    #[test]
    fn measure_text_rejects_interior_nul() {
        assert_eq!(measure_text("a\0b", 20), 0);
    }

    #[test]
    fn wrap_text_of_empty_string_is_empty() {
        assert!(wrap_text("", BODY_SIZE, 400).is_empty());
        assert!(wrap_text("   ", BODY_SIZE, 400).is_empty());
    }

    #[test]
    fn wrap_text_keeps_a_single_word_whole() {
        assert_eq!(wrap_text("hola", BODY_SIZE, 400), vec!["hola".to_string()]);
    }
}
