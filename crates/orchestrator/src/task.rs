//! Task catalogue: prompt templates and fixed model parameters.

use serde::Serialize;

/// Batch-mode summary instructions.
const BATCH_SUMMARY_PROMPT: &str = "Provide a concise summary of this document.
Include:
- Main topic (1 sentence)
- Key points (3-5 bullet points)
- Conclusion or outcome (1 sentence)

Keep it brief and clear.";

const EXECUTIVE_SUMMARY_PROMPT: &str = "Provide a 2-3 paragraph executive summary:";

const DETAILED_ANALYSIS_PROMPT: &str = "Analyze this document in detail:

1. MAIN TOPIC: What is this document about?
2. KEY THEMES: What are the 3-5 main themes?
3. IMPORTANT DETAILS: List 5-7 specific details, facts, or data points
4. STRUCTURE: How is the document organized?
5. TONE & PURPOSE: What's the tone? What's the purpose?
6. ACTIONABLE INSIGHTS: What actions or decisions does this suggest?

Be specific and cite examples from the document.";

const EXPORT_SUMMARY_PROMPT: &str = "Create a structured summary of this document:

1. TITLE: A clear, descriptive title (under 10 words)
2. EXECUTIVE SUMMARY: 2-3 sentence overview
3. KEY POINTS: 5-7 bullet points of main ideas
4. DETAILS: 2-3 paragraphs of important details
5. CONCLUSION: 1-2 sentences

Format with clear section headers.";

const COMPARISON_FORMAT: &str = "Provide analysis in this format:

SIMILARITIES:
- List 3-5 key similarities or overlapping themes

DIFFERENCES:
- List 3-5 key differences in content, tone, or focus

UNIQUE TO DOCUMENT 1:
- 2-3 points only found in document 1

UNIQUE TO DOCUMENT 2:
- 2-3 points only found in document 2

RELATIONSHIP:
- How do these documents relate? (complementary, contradictory, independent, etc.)

SUMMARY:
- One paragraph summarizing the comparison";

const SYNTHESIS_FORMAT: &str = "Provide:

MAIN THEMES:
- Identify 3-5 overarching themes across all documents

KEY INSIGHTS BY DOCUMENT:
- 1-2 key points from each document

CONNECTIONS:
- How do these documents relate to each other?
- What story do they tell together?

SYNTHESIS SUMMARY:
- 2-3 paragraphs synthesizing all documents into a coherent narrative";

/// Fixed parameters for one task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskSpec {
    /// Role framing sent as the system message.
    pub system: &'static str,
    /// Per-segment truncation ceiling, in characters.
    pub ceiling: usize,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// How many input segments a task takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, n: usize) -> bool {
        match *self {
            Self::Exactly(k) => n == k,
            Self::AtLeast(k) => n >= k,
        }
    }
}

/// The completion tasks the pipeline knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Short summary used for every document of a batch run.
    BatchSummary,
    /// Two-to-three paragraph executive summary.
    ExecutiveSummary,
    /// Six-part breakdown of a single document.
    DetailedAnalysis,
    /// Sectioned summary meant for export.
    ExportSummary,
    /// Side-by-side comparison of two documents.
    Comparison,
    /// Combined narrative over three or more documents.
    Synthesis,
}

impl Task {
    pub const ALL: [Task; 6] = [
        Task::BatchSummary,
        Task::ExecutiveSummary,
        Task::DetailedAnalysis,
        Task::ExportSummary,
        Task::Comparison,
        Task::Synthesis,
    ];

    pub fn spec(&self) -> TaskSpec {
        match self {
            Self::BatchSummary => TaskSpec {
                system: "You create concise, accurate summaries quickly.",
                ceiling: 20_000,
                temperature: 0.4,
                max_tokens: 300,
            },
            Self::ExecutiveSummary => TaskSpec {
                system: "Create concise executive summaries.",
                ceiling: 15_000,
                temperature: 0.5,
                max_tokens: 300,
            },
            Self::DetailedAnalysis => TaskSpec {
                system: "You are a thorough document analyst.",
                ceiling: 15_000,
                temperature: 0.4,
                max_tokens: 700,
            },
            Self::ExportSummary => TaskSpec {
                system: "You create well-structured summaries with clear sections.",
                ceiling: 15_000,
                temperature: 0.5,
                max_tokens: 600,
            },
            Self::Comparison => TaskSpec {
                system: "You are an expert document analyst who compares documents precisely and identifies key relationships.",
                ceiling: 15_000,
                temperature: 0.4,
                max_tokens: 800,
            },
            Self::Synthesis => TaskSpec {
                system: "You synthesize information from multiple documents, finding connections and creating unified narratives.",
                ceiling: 8_000,
                temperature: 0.5,
                max_tokens: 1000,
            },
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Self::Comparison => Arity::Exactly(2),
            Self::Synthesis => Arity::AtLeast(3),
            _ => Arity::Exactly(1),
        }
    }

    /// Short name used in logs and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BatchSummary => "batch_summary",
            Self::ExecutiveSummary => "executive_summary",
            Self::DetailedAnalysis => "detailed_analysis",
            Self::ExportSummary => "export_summary",
            Self::Comparison => "comparison",
            Self::Synthesis => "synthesis",
        }
    }

    /// Fill the task template with already-truncated `(label, text)` pairs.
    ///
    /// Callers must have checked [`Task::arity`].
    pub(crate) fn render(&self, segments: &[(&str, &str)]) -> String {
        match self {
            Self::BatchSummary => single_document(BATCH_SUMMARY_PROMPT, segments[0].1),
            Self::ExecutiveSummary => {
                format!("{}\n\n{}", EXECUTIVE_SUMMARY_PROMPT, segments[0].1)
            }
            Self::DetailedAnalysis => single_document(DETAILED_ANALYSIS_PROMPT, segments[0].1),
            Self::ExportSummary => single_document(EXPORT_SUMMARY_PROMPT, segments[0].1),
            Self::Comparison => {
                let (name1, text1) = segments[0];
                let (name2, text2) = segments[1];
                format!(
                    "Compare these two documents and provide a structured analysis:\n\n\
                     Document 1 ({}):\n{}\n\n\
                     Document 2 ({}):\n{}\n\n{}",
                    name1, text1, name2, text2, COMPARISON_FORMAT
                )
            }
            Self::Synthesis => {
                let mut combined = String::new();
                for (i, (name, text)) in segments.iter().enumerate() {
                    combined.push_str(&format!(
                        "\n\n=== DOCUMENT {}: {} ===\n{}\n",
                        i + 1,
                        name,
                        text
                    ));
                }
                format!(
                    "Analyze these multiple documents and create a synthesis:\n\n{}\n\n{}",
                    combined, SYNTHESIS_FORMAT
                )
            }
        }
    }
}

fn single_document(prompt: &str, text: &str) -> String {
    format!("{}\n\nDocument:\n{}", prompt, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceilings() {
        assert_eq!(Task::BatchSummary.spec().ceiling, 20_000);
        assert_eq!(Task::ExecutiveSummary.spec().ceiling, 15_000);
        assert_eq!(Task::Comparison.spec().ceiling, 15_000);
        assert_eq!(Task::Synthesis.spec().ceiling, 8_000);
    }

    #[test]
    fn test_output_budgets_stay_in_range() {
        for task in Task::ALL {
            let spec = task.spec();
            assert!((300..=1000).contains(&spec.max_tokens), "{:?}", task);
            assert!(!spec.system.is_empty());
        }
    }

    #[test]
    fn test_arity() {
        assert!(Task::ExecutiveSummary.arity().accepts(1));
        assert!(!Task::ExecutiveSummary.arity().accepts(2));
        assert!(Task::Comparison.arity().accepts(2));
        assert!(!Task::Comparison.arity().accepts(3));
        assert!(!Task::Synthesis.arity().accepts(2));
        assert!(Task::Synthesis.arity().accepts(3));
        assert!(Task::Synthesis.arity().accepts(7));
    }

    #[test]
    fn test_render_labels_documents() {
        let comparison = Task::Comparison.render(&[("a.txt", "first"), ("b.pdf", "second")]);
        assert!(comparison.contains("Document 1 (a.txt):\nfirst"));
        assert!(comparison.contains("Document 2 (b.pdf):\nsecond"));
        assert!(comparison.ends_with("One paragraph summarizing the comparison"));

        let synthesis =
            Task::Synthesis.render(&[("a", "one"), ("b", "two"), ("c", "three")]);
        assert!(synthesis.contains("=== DOCUMENT 1: a ===\none\n"));
        assert!(synthesis.contains("=== DOCUMENT 3: c ===\nthree\n"));
    }

    #[test]
    fn test_render_single_document() {
        let prompt = Task::BatchSummary.render(&[("doc", "body text")]);
        assert!(prompt.starts_with("Provide a concise summary of this document."));
        assert!(prompt.ends_with("\n\nDocument:\nbody text"));

        let exec = Task::ExecutiveSummary.render(&[("doc", "body")]);
        assert_eq!(exec, "Provide a 2-3 paragraph executive summary:\n\nbody");
    }
}
