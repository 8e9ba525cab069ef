//! Static page content.
//!
//! Each page is an ordered list of [`Section`]s; every section becomes one
//! scroll-reactive block.  Nothing here knows about terminals.

use super::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub url: &'static str,
}

/// What a section shows below its heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    /// Big title lines followed by the rotating name and a tagline.
    Hero {
        lines: &'static [&'static str],
        tagline: &'static str,
    },
    /// A single image placeholder.
    Image { alt: &'static str },
    /// Bento grid of image placeholders; the first one is the feature image.
    Photos(&'static [&'static str]),
    Bullets(&'static [&'static str]),
    Links(&'static [Link]),
    Prose(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub heading: Option<&'static str>,
    pub body: Body,
    pub gradient: Option<Glow>,
}

/// Hover gradient: colour stops and the oval's box in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glow {
    pub stops: &'static [&'static str],
    pub width: u16,
    pub height: u16,
}

/// Top navigation bar contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavBar {
    pub brand: &'static str,
    /// Where clicking the brand goes, if anywhere.
    pub brand_target: Option<Route>,
    pub links: &'static [(&'static str, Route)],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub route: Route,
    pub nav: NavBar,
    pub sections: &'static [Section],
}

pub const BRAND: &str = "Adriel De Vera";

const WARM: Glow = Glow {
    stops: &["#ff7f50", "#ff6bd6", "#ffe08a"],
    width: 400,
    height: 400,
};
const COOL: Glow = Glow {
    stops: &["#ff6b6b", "#4ecdc4", "#45b7d1"],
    width: 300,
    height: 300,
};
const SOFT: Glow = Glow {
    stops: &["#ff9a9e", "#fecfef", "#fecfef"],
    width: 200,
    height: 200,
};
const MINT: Glow = Glow {
    stops: &["#a8edea", "#fed6e3"],
    width: 250,
    height: 250,
};

const HOME_LINKS: &[Link] = &[
    Link { label: "Email", url: "mailto:aidever@uwaterloo.ca" },
    Link { label: "Read.cv", url: "https://read.cv/adrieldv" },
    Link { label: "Linkedin", url: "https://www.linkedin.com/in/adrieldevera/" },
    Link { label: "Medium", url: "https://medium.com/@adrieldv" },
    Link { label: "Github", url: "https://github.com/AdrielDeVera" },
    Link { label: "Curius", url: "https://curius.app/adriel-de-vera" },
];

const HOME_SECTIONS: &[Section] = &[
    Section {
        heading: None,
        body: Body::Hero {
            lines: &["Home Base."],
            tagline: "Busy Building Digital and Physical Networks",
        },
        gradient: Some(WARM),
    },
    Section {
        heading: None,
        body: Body::Image { alt: "Workspace" },
        gradient: None,
    },
    Section {
        heading: Some("Quick Intro"),
        body: Body::Bullets(&[
            "🏫 3rd Year Engineer + Minor AI @ UWaterloo",
            "🎓 Graduating Spring 2026",
            "🤖 Experience in Software Architecture + Distributed Systems",
            "🖥️ SWE Internships in Aerospace + Ai + IOT",
            "📊 Research Assistant at the Behavioural Analytics and Modelling Lab",
        ]),
        gradient: Some(MINT),
    },
    Section {
        heading: Some("Still Curious?"),
        body: Body::Links(HOME_LINKS),
        gradient: Some(SOFT),
    },
];

const ABOUT_SECTIONS: &[Section] = &[
    Section {
        heading: None,
        body: Body::Photos(&[
            "Engineering workspace",
            "AI visualization",
            "Research lab",
            "Tech diagram",
            "Coding setup",
        ]),
        gradient: None,
    },
    Section {
        heading: Some("Welcome Back!"),
        body: Body::Prose(
            "Adriel here, a Management Engineering student at uWaterloo with experience in \
             software architecture, distributed systems, and full-stack development from \
             internships in AI, aerospace, and engineering. I'm passionate about creating \
             user-centric solutions at the intersection of people, software, and design while \
             advocating for representation for minorities in tech, particularly the Filipino \
             community. I love building communities, uplifting others, and am always excited \
             to connect with new people!",
        ),
        gradient: Some(COOL),
    },
    Section {
        heading: Some("Experience"),
        body: Body::Bullets(&[
            "Software Engineer @ Replicant AI",
            "Software Engineer @ Raytheon Technologies",
            "Systems Engineer @ Multimatic Inc",
        ]),
        gradient: Some(WARM),
    },
    Section {
        heading: Some("Current Obsessions"),
        body: Body::Bullets(&[
            "Training for a Triathlon",
            "Staying organized with Personal Knowledge Management Systems",
            "Avid Sticker Collector",
        ]),
        gradient: Some(SOFT),
    },
    Section {
        heading: Some("Side Quests"),
        body: Body::Bullets(&[
            "Founded the uWaterloo Filipino Student Assoc (+400 members)",
            "uWaterloo Engineering Mentor + Ambassador",
            "Received the Engineering Society Leadership Excellence Award",
        ]),
        gradient: Some(MINT),
    },
];

/// Content for `route`.
pub fn page(route: Route) -> Page {
    match route {
        Route::Home => Page {
            route,
            nav: NavBar {
                brand: BRAND,
                brand_target: None,
                links: &[("About Me", Route::About)],
            },
            sections: HOME_SECTIONS,
        },
        Route::About => Page {
            route,
            nav: NavBar {
                brand: BRAND,
                brand_target: Some(Route::Home),
                links: &[],
            },
            sections: ABOUT_SECTIONS,
        },
    }
}
