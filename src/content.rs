//! Compiled-in portfolio content. Nothing here changes after start-up.

/// Number of slots in a proficiency indicator.
pub const SKILL_SLOTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    level: u8,
}

impl Skill {
    /// Levels above the slot count are clamped.
    pub const fn new(name: &'static str, level: u8) -> Self {
        let level = if level as usize > SKILL_SLOTS {
            SKILL_SLOTS as u8
        } else {
            level
        };
        Self { name, level }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn dots(&self) -> [bool; SKILL_SLOTS] {
        skill_dots(self.level)
    }
}

/// Filled/unfilled indicator for a proficiency level: `level` leading
/// `true`s, the rest `false`.
pub fn skill_dots(level: u8) -> [bool; SKILL_SLOTS] {
    let mut dots = [false; SKILL_SLOTS];
    for (i, dot) in dots.iter_mut().enumerate() {
        *dot = i < level as usize;
    }
    dots
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillCategory {
    pub title: &'static str,
    pub skills: &'static [Skill],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconClass {
    Ai,
    Code,
}

impl IconClass {
    pub fn as_str(self) -> &'static str {
        match self {
            IconClass::Ai => "ai",
            IconClass::Code => "code",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    /// Display label only.
    pub number: &'static str,
    pub icon: &'static str,
    pub icon_class: IconClass,
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub metric_value: &'static str,
    pub metric_label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Read-only view over the three content sequences.
#[derive(Debug, Clone, Copy)]
pub struct ContentModel {
    skill_categories: &'static [SkillCategory],
    projects: &'static [Project],
    achievements: &'static [Achievement],
}

impl ContentModel {
    pub fn builtin() -> Self {
        Self {
            skill_categories: SKILL_CATEGORIES,
            projects: PROJECTS,
            achievements: ACHIEVEMENTS,
        }
    }

    pub fn skill_categories(&self) -> &'static [SkillCategory] {
        self.skill_categories
    }

    pub fn projects(&self) -> &'static [Project] {
        self.projects
    }

    pub fn achievements(&self) -> &'static [Achievement] {
        self.achievements
    }
}

impl Default for ContentModel {
    fn default() -> Self {
        Self::builtin()
    }
}

static SKILL_CATEGORIES: &[SkillCategory] = &[
    SkillCategory {
        title: "Languages",
        skills: &[
            Skill::new("C / C++", 5),
            Skill::new("Python", 4),
            Skill::new("JavaScript", 4),
            Skill::new("SQL", 4),
        ],
    },
    SkillCategory {
        title: "AI / ML",
        skills: &[
            Skill::new("Deep Learning", 5),
            Skill::new("TensorFlow / Keras", 4),
            Skill::new("NLP", 4),
            Skill::new("Neural Networks", 5),
        ],
    },
    SkillCategory {
        title: "Core CS",
        skills: &[
            Skill::new("Data Structures & Algorithms", 5),
            Skill::new("Operating Systems", 4),
            Skill::new("DBMS", 4),
            Skill::new("Networking", 4),
        ],
    },
    SkillCategory {
        title: "Tools & Frameworks",
        skills: &[
            Skill::new("Git / GitHub", 5),
            Skill::new("VS Code", 5),
            Skill::new("PyTorch", 4),
            Skill::new("Web Development", 3),
        ],
    },
];

static PROJECTS: &[Project] = &[
    Project {
        number: "01",
        icon: "🫁",
        icon_class: IconClass::Ai,
        title: "Enhanced Pneumonia Detection",
        description: "Built a CNN using transfer learning on 5,856 chest X-ray images. \
                      Applied preprocessing, LR tuning, and VGG16 layer freezing to achieve \
                      industry-grade accuracy.",
        tech: &["Python", "TensorFlow", "Keras", "VGG16", "PyTorch"],
        metric_value: "95%",
        metric_label: "Accuracy achieved through advanced optimization",
    },
    Project {
        number: "02",
        icon: "⚡",
        icon_class: IconClass::Code,
        title: "Custom Programming Language",
        description: "Implemented a complete interpreter using recursive descent parsing, \
                      lexer, and AST evaluation. Features 20+ core constructs including \
                      variables, control flow, and functions.",
        tech: &["C", "Parsing", "Compilers", "AST"],
        metric_value: "20+",
        metric_label: "Language features implemented from scratch",
    },
    Project {
        number: "03",
        icon: "🎮",
        icon_class: IconClass::Ai,
        title: "RL Pokemon Agent",
        description: "Mentored a team to create a reinforcement learning agent for a custom \
                      Pokemon game using modified Q-learning algorithm over 20,000 training \
                      episodes.",
        tech: &["Python", "Q-Learning", "RL", "Game AI"],
        metric_value: "78%",
        metric_label: "Win rate achieved from initial 42%",
    },
    Project {
        number: "04",
        icon: "🤖",
        icon_class: IconClass::Code,
        title: "SarcasticBot — Hackverse Winner",
        description: "Built a conversational AI robot teacher using RAG architecture. Won a \
                      track at Hackverse Hackathon for achieving exceptional response \
                      relevance.",
        tech: &["RAG", "NLP", "LLMs", "AI"],
        metric_value: "92%",
        metric_label: "Response accuracy across 500+ test prompts",
    },
];

static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        icon: "🏆",
        title: "Hackverse Winner",
        description: "Won a track for SarcasticBot — an AI robot teacher with 92% accuracy",
    },
    Achievement {
        icon: "🎓",
        title: "Deep Learning Certified",
        description: "Completed Deep Learning Specialization certification",
    },
    Achievement {
        icon: "💼",
        title: "Google Intern",
        description: "Selected for Software Engineering internship at Google",
    },
    Achievement {
        icon: "👥",
        title: "ACM Executive",
        description: "Mentored teams and led RL projects as executive member",
    },
    Achievement {
        icon: "🧠",
        title: "IEEE",
        description: "Brain Tumor Classification project achieving 94% accuracy",
    },
    Achievement {
        icon: "🌐",
        title: "Web Enthusiasts' Club",
        description: "Executive member, participated in AI/ML and Linux sessions",
    },
    Achievement {
        icon: "📊",
        title: "Top Academic",
        description: "9.04 CGPA at NIT Karnataka & 98.2% in Class 12",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_have_level_leading_fills() {
        for level in 0..=5u8 {
            let dots = skill_dots(level);
            assert_eq!(dots.iter().filter(|d| **d).count(), level as usize);
            assert!(dots[..level as usize].iter().all(|d| *d));
            assert!(dots[level as usize..].iter().all(|d| !*d));
        }
        assert_eq!(skill_dots(3), [true, true, true, false, false]);
    }

    #[test]
    fn levels_are_clamped() {
        let skill = Skill::new("Overrated", 9);
        assert_eq!(skill.level(), 5);
        assert_eq!(skill.dots(), [true; 5]);
    }

    #[test]
    fn builtin_content_is_populated() {
        let model = ContentModel::builtin();
        assert_eq!(model.skill_categories().len(), 4);
        assert_eq!(model.projects().len(), 4);
        assert_eq!(model.achievements().len(), 7);
        assert!(model
            .skill_categories()
            .iter()
            .flat_map(|c| c.skills)
            .all(|s| s.level() as usize <= SKILL_SLOTS));
    }
}
