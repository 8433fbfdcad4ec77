//! Generation lifecycle: Idle -> Generating -> (Ready | Failed).
//!
//! One tagged value instead of separate loading/result/error flags.

use super::entities::GeneratedLesson;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationState {
    /// Nothing generated yet.
    #[default]
    Idle,
    /// Request in flight. `previous` is held back so a failure can restore it;
    /// it is not visible through [`GenerationState::lesson`].
    Generating { previous: Option<GeneratedLesson> },
    Ready(GeneratedLesson),
    /// Last request failed. The lesson from before the request stays usable.
    Failed {
        message: String,
        previous: Option<GeneratedLesson>,
    },
}

impl GenerationState {
    /// Enter `Generating`, carrying over whatever lesson is currently usable.
    pub fn begin(self) -> Self {
        GenerationState::Generating {
            previous: self.into_lesson(),
        }
    }

    /// Lesson available for preview and export.
    pub fn lesson(&self) -> Option<&GeneratedLesson> {
        match self {
            GenerationState::Ready(lesson) => Some(lesson),
            GenerationState::Failed { previous, .. } => previous.as_ref(),
            GenerationState::Idle | GenerationState::Generating { .. } => None,
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self, GenerationState::Generating { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            GenerationState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    fn into_lesson(self) -> Option<GeneratedLesson> {
        match self {
            GenerationState::Idle => None,
            GenerationState::Ready(lesson) => Some(lesson),
            GenerationState::Generating { previous } | GenerationState::Failed { previous, .. } => {
                previous
            }
        }
    }

    /// Settle a `Generating` state with the request outcome.
    pub fn finish(self, outcome: Result<GeneratedLesson, String>) -> Self {
        match outcome {
            Ok(lesson) => GenerationState::Ready(lesson),
            Err(message) => GenerationState::Failed {
                message,
                previous: self.into_lesson(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(name: &str) -> GeneratedLesson {
        GeneratedLesson {
            outline: "outline".into(),
            file_name: name.into(),
            slides: vec![],
        }
    }

    #[test]
    fn test_idle_has_no_lesson() {
        let state = GenerationState::default();
        assert!(state.lesson().is_none());
        assert!(!state.is_generating());
    }

    #[test]
    fn test_generating_hides_previous() {
        let state = GenerationState::Ready(lesson("a.pptx")).begin();
        assert!(state.is_generating());
        assert!(state.lesson().is_none());
    }

    #[test]
    fn test_failure_keeps_previous() {
        let state = GenerationState::Ready(lesson("a.pptx"))
            .begin()
            .finish(Err("boom".into()));
        assert_eq!(state.error_message(), Some("boom"));
        assert_eq!(state.lesson().map(|l| l.file_name.as_str()), Some("a.pptx"));
    }

    #[test]
    fn test_success_replaces_lesson() {
        let state = GenerationState::Failed {
            message: "old".into(),
            previous: Some(lesson("a.pptx")),
        }
        .begin()
        .finish(Ok(lesson("b.pptx")));
        assert!(state.error_message().is_none());
        assert_eq!(state.lesson().map(|l| l.file_name.as_str()), Some("b.pptx"));
    }

    #[test]
    fn test_first_failure_has_nothing_to_export() {
        let state = GenerationState::Idle.begin().finish(Err("x".into()));
        assert!(state.lesson().is_none());
    }
}
