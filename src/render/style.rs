use crossterm::style::Color;

use crate::config::Theme;

/// What a run of text represents on screen. Each role maps to a colour pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Text,
    Live,
    Dead,
    Border,
    /// The edit cursor and the selected menu entry
    Highlight,
    Banner,
}

/// Foreground/background colours for every role under one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub live: Color,
    pub dead: Color,
    pub border: Color,
    pub banner: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Palette {
                background: Color::Rgb { r: 12, g: 12, b: 16 },
                text: Color::Rgb { r: 210, g: 210, b: 210 },
                live: Color::Rgb { r: 50, g: 255, b: 50 },
                dead: Color::Rgb { r: 70, g: 70, b: 80 },
                border: Color::Rgb { r: 60, g: 140, b: 220 },
                banner: Color::Rgb { r: 255, g: 200, b: 40 },
            },
            Theme::Light => Palette {
                background: Color::Rgb { r: 245, g: 242, b: 232 },
                text: Color::Rgb { r: 30, g: 30, b: 30 },
                live: Color::Rgb { r: 0, g: 110, b: 30 },
                dead: Color::Rgb { r: 170, g: 170, b: 160 },
                border: Color::Rgb { r: 30, g: 80, b: 170 },
                banner: Color::Rgb { r: 170, g: 60, b: 0 },
            },
        }
    }

    fn sgr(&self, role: Role) -> String {
        let fg = match role {
            Role::Text | Role::Highlight => self.text,
            Role::Live => self.live,
            Role::Dead => self.dead,
            Role::Border => self.border,
            Role::Banner => self.banner,
        };
        let mut sgr = format!("{};{}", color_to_fg(fg), color_to_bg(self.background));
        if role == Role::Highlight {
            sgr.push_str(";7");
        }
        sgr
    }
}

/// Builds one line of output, switching SGR only when the role changes.
/// Without a palette it produces plain text.
pub struct Painter<'a> {
    palette: Option<&'a Palette>,
    out: String,
    current: Option<Role>,
}

impl<'a> Painter<'a> {
    pub fn new(palette: Option<&'a Palette>) -> Self {
        Painter {
            palette,
            out: String::new(),
            current: None,
        }
    }

    pub fn paint(&mut self, role: Role, text: &str) -> &mut Self {
        if let Some(palette) = self.palette
            && self.current != Some(role)
        {
            // Reset first so a previous reverse-video run does not leak
            self.out.push_str("\x1b[0;");
            self.out.push_str(&palette.sgr(role));
            self.out.push('m');
            self.current = Some(role);
        }
        self.out.push_str(text);
        self
    }

    pub fn finish(mut self) -> String {
        if self.palette.is_some() && self.current.is_some() {
            self.out.push_str("\x1b[0m");
        }
        self.out
    }
}

/// Paint a whole line in one role.
pub fn line(palette: Option<&Palette>, role: Role, text: &str) -> String {
    let mut p = Painter::new(palette);
    p.paint(role, text);
    p.finish()
}

/// Truecolor SGR parameters. Palettes are all RGB; anything else gets the terminal default.
pub fn color_to_fg(color: Color) -> String {
    match color {
        Color::Rgb { r, g, b } => format!("38;2;{};{};{}", r, g, b),
        _ => "39".into(),
    }
}

pub fn color_to_bg(color: Color) -> String {
    match color {
        Color::Rgb { r, g, b } => format!("48;2;{};{};{}", r, g, b),
        _ => "49".into(),
    }
}
