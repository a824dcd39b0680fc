// src/services/subject_service.rs
//! Static catalog of the subjects the tutor knows about.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SubjectInfo {
    pub name: String,
    pub description: String,
    pub topics: Vec<String>,
    pub examples: Vec<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SubjectStats {
    pub topics_count: usize,
    pub examples_count: usize,
}

/// Read-only table, built on first use and never mutated.
#[derive(Debug)]
pub struct SubjectCatalog {
    subjects: Vec<SubjectInfo>,
}

static CATALOG: LazyLock<SubjectCatalog> = LazyLock::new(SubjectCatalog::builtin);

pub fn catalog() -> &'static SubjectCatalog {
    &CATALOG
}

fn subject(name: &str, description: &str, topics: &[&str], examples: &[&str]) -> SubjectInfo {
    SubjectInfo {
        name: name.to_string(),
        description: description.to_string(),
        topics: topics.iter().map(|t| t.to_string()).collect(),
        examples: examples.iter().map(|e| e.to_string()).collect(),
    }
}

impl SubjectCatalog {
    fn builtin() -> Self {
        let subjects = vec![
            subject(
                "AP Calculus",
                "Advanced Placement Calculus covering differential and integral calculus with applications",
                &[
                    "Limits and Continuity",
                    "Derivatives and Differentiation Rules",
                    "Applications of Derivatives",
                    "Integrals and Integration Techniques",
                    "Applications of Integrals",
                    "Differential Equations",
                    "Series and Sequences",
                    "Parametric Equations",
                    "Polar Coordinates",
                    "Vector-Valued Functions",
                ],
                &[
                    "Find the derivative of f(x) = x²·sin(x)",
                    "Calculate the area between curves y = x² and y = 2x",
                    "Solve the differential equation dy/dx = 2x + y",
                    "Find the limit as x approaches 0 of sin(x)/x",
                    "Evaluate the integral ∫(x² + 2x + 1)dx",
                ],
            ),
            subject(
                "AP Physics",
                "Advanced Placement Physics covering mechanics, electricity, and magnetism",
                &[
                    "Kinematics and Motion",
                    "Forces and Newton's Laws",
                    "Work, Energy, and Power",
                    "Linear Momentum and Collisions",
                    "Circular Motion and Gravitation",
                    "Rotational Motion",
                    "Simple Harmonic Motion",
                    "Electric Charges and Fields",
                    "Electric Potential and Capacitance",
                    "Current and Resistance",
                    "Magnetic Fields and Forces",
                    "Electromagnetic Induction",
                    "Wave Phenomena",
                ],
                &[
                    "Calculate the acceleration of a block on an inclined plane",
                    "Find the velocity of a projectile at maximum height",
                    "Determine the force between two charged particles",
                    "Calculate the period of a simple pendulum",
                    "Find the current in a series circuit with resistors",
                ],
            ),
            subject(
                "AP Chemistry",
                "Advanced Placement Chemistry covering atomic structure, reactions, and thermodynamics",
                &[
                    "Atomic Structure and Periodicity",
                    "Chemical Bonding and Molecular Geometry",
                    "States of Matter and Intermolecular Forces",
                    "Chemical Reactions and Stoichiometry",
                    "Thermochemistry and Thermodynamics",
                    "Chemical Kinetics",
                    "Chemical Equilibrium",
                    "Acid-Base Chemistry",
                    "Electrochemistry",
                    "Nuclear Chemistry",
                    "Organic Chemistry Fundamentals",
                ],
                &[
                    "Balance the chemical equation: Fe + O₂ → Fe₂O₃",
                    "Calculate the pH of a 0.1M HCl solution",
                    "Find the equilibrium constant for a reaction",
                    "Determine the molecular geometry of H₂O",
                    "Calculate the heat of reaction using bond energies",
                ],
            ),
            subject(
                "AMC Math",
                "American Mathematics Competitions covering algebra, geometry, and problem-solving",
                &[
                    "Algebra and Functions",
                    "Geometry and Trigonometry",
                    "Number Theory",
                    "Combinatorics and Probability",
                    "Sequences and Series",
                    "Complex Numbers",
                    "Polynomials and Equations",
                    "Inequalities",
                    "Problem-Solving Strategies",
                    "Proof Techniques",
                ],
                &[
                    "Find all real solutions to x² + 5x + 6 = 0",
                    "Calculate the area of a triangle with sides 3, 4, 5",
                    "How many ways can 5 people sit around a circular table?",
                    "Find the sum of the first 100 positive integers",
                    "Prove that √2 is irrational",
                ],
            ),
        ];
        Self { subjects }
    }

    pub fn all(&self) -> &[SubjectInfo] {
        &self.subjects
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&SubjectInfo> {
        self.subjects.iter().find(|s| s.name == name)
    }

    pub fn topics_for(&self, name: &str) -> &[String] {
        self.get(name).map(|s| s.topics.as_slice()).unwrap_or(&[])
    }

    /// Names of subjects with at least one topic containing `topic`.
    pub fn search_by_topic(&self, topic: &str) -> Vec<&str> {
        let needle = topic.to_lowercase();
        self.subjects
            .iter()
            .filter(|s| s.topics.iter().any(|t| t.to_lowercase().contains(&needle)))
            .map(|s| s.name.as_str())
            .collect()
    }

    pub fn related_topics(&self, name: &str, topic: &str) -> Vec<&str> {
        let needle = topic.to_lowercase();
        self.topics_for(name)
            .iter()
            .filter(|t| {
                let t = t.to_lowercase();
                t.contains(&needle) || needle.contains(&t)
            })
            .map(String::as_str)
            .collect()
    }

    pub fn statistics(&self) -> BTreeMap<&str, SubjectStats> {
        self.subjects
            .iter()
            .map(|s| {
                (
                    s.name.as_str(),
                    SubjectStats {
                        topics_count: s.topics.len(),
                        examples_count: s.examples.len(),
                    },
                )
            })
            .collect()
    }
}
