use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad grouping of a skill, used for node colouring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	Core,
	Frontend,
	Backend,
	Data,
}

impl Category {
	pub fn color(self) -> &'static str {
		match self {
			Category::Core => "#818cf8",
			Category::Frontend => "#3b82f6",
			Category::Backend => "#10b981",
			Category::Data => "#f59e0b",
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Category::Core => "core",
			Category::Frontend => "frontend",
			Category::Backend => "backend",
			Category::Data => "data",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Skill {
	pub id: &'static str,
	pub label: &'static str,
	pub category: Category,
}

/// Position as a fraction of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
	pub fx: f64,
	pub fy: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePosition {
	pub x: f64,
	pub y: f64,
}

impl Anchor {
	pub fn resolve(self, width: f64, height: f64) -> NodePosition {
		NodePosition {
			x: width * self.fx,
			y: height * self.fy,
		}
	}
}

/// The skills a student can flag.
pub const SKILLS: &[Skill] = &[
	Skill { id: "py", label: "Python", category: Category::Core },
	Skill { id: "dsa", label: "DSA", category: Category::Core },
	Skill { id: "js", label: "JS", category: Category::Frontend },
	Skill { id: "api", label: "API", category: Category::Backend },
	Skill { id: "arch", label: "Arch", category: Category::Core },
	Skill { id: "fe", label: "Frontend", category: Category::Frontend },
	Skill { id: "sql", label: "SQL", category: Category::Data },
	Skill { id: "db", label: "DB", category: Category::Data },
	Skill { id: "react", label: "React", category: Category::Frontend },
];

pub const SKILL_EDGES: &[(&str, &str)] = &[
	("py", "dsa"),
	("dsa", "arch"),
	("js", "fe"),
	("fe", "react"),
	("api", "db"),
	("db", "sql"),
	("dsa", "js"),
	("py", "api"),
];

/// Layout used for both drawing and hit testing.
pub const LAYOUT: &[(&str, Anchor)] = &[
	("py", Anchor { fx: 0.3, fy: 0.3 }),
	("dsa", Anchor { fx: 0.5, fy: 0.5 }),
	("js", Anchor { fx: 0.7, fy: 0.3 }),
	("api", Anchor { fx: 0.2, fy: 0.5 }),
	("arch", Anchor { fx: 0.8, fy: 0.5 }),
	("fe", Anchor { fx: 0.3, fy: 0.7 }),
	("sql", Anchor { fx: 0.5, fy: 0.8 }),
	("db", Anchor { fx: 0.6, fy: 0.65 }),
	("react", Anchor { fx: 0.7, fy: 0.7 }),
];

pub fn anchor_of(id: &str) -> Option<Anchor> {
	LAYOUT.iter().find(|(k, _)| *k == id).map(|(_, a)| *a)
}

/// Skill ids the student has flagged as weak.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WeakSkillSet(BTreeSet<String>);

impl WeakSkillSet {
	/// Flips membership of `id`. Returns `true` if the skill is now flagged.
	pub fn toggle(&mut self, id: &str) -> bool {
		if self.0.remove(id) {
			false
		} else {
			self.0.insert(id.to_owned());
			true
		}
	}

	pub fn contains(&self, id: &str) -> bool {
		self.0.contains(id)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Flagged skills from `catalog`, in catalog order.
	pub fn skills_in<'a>(&'a self, catalog: &'a [Skill]) -> impl Iterator<Item = &'a Skill> + 'a {
		catalog.iter().filter(move |s| self.contains(s.id))
	}
}

impl<S: Into<String>> FromIterator<S> for WeakSkillSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}
