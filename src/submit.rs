//! Profile submission hook
//!
//! The profile view performs no I/O itself; whatever the surrounding
//! application wants to do with an updated profile goes behind
//! [`ProfileSubmitter`].

use anyhow::Result;

use crate::models::ProfileSubmission;

/// Collaborator invoked when the user presses Update
pub trait ProfileSubmitter: Send {
    fn submit(&mut self, submission: &ProfileSubmission) -> Result<()>;
}

/// Default collaborator: writes the payload to the log and nothing else
#[derive(Debug, Default)]
pub struct LogSubmitter;

impl ProfileSubmitter for LogSubmitter {
    fn submit(&mut self, submission: &ProfileSubmission) -> Result<()> {
        let payload = serde_json::to_string(submission)?;
        tracing::info!(payload = %payload, "Profile update submitted");
        Ok(())
    }
}

impl<F> ProfileSubmitter for F
where
    F: FnMut(&ProfileSubmission) -> Result<()> + Send,
{
    fn submit(&mut self, submission: &ProfileSubmission) -> Result<()> {
        self(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfileDraft;

    #[test]
    fn test_log_submitter_accepts_any_draft() {
        let draft = ProfileDraft::default();
        assert!(LogSubmitter.submit(&draft.to_submission(None)).is_ok());
    }

    #[test]
    fn test_closure_submitter() {
        let mut seen = Vec::new();
        {
            let mut submitter = |s: &ProfileSubmission| {
                seen.push(s.form.first_name.clone());
                Ok::<(), anyhow::Error>(())
            };
            let mut draft = ProfileDraft::default();
            draft.form.first_name = "Ada".into();
            submitter.submit(&draft.to_submission(None)).unwrap();
        }
        assert_eq!(seen, vec!["Ada".to_string()]);
    }
}
