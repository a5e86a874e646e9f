//! Batch job files
//!
//! A job file is a JSON array of tagged jobs:
//!
//! ```json
//! [
//!   {"kind": "verify", "header": "00..", "nonce": "00..", "solution": "0b6f..", "n": 48, "k": 5},
//!   {"kind": "target", "solution": "deadbeef", "bits": 16777216}
//! ]
//! ```
//!
//! Jobs are independent and run on a dedicated rayon pool. Reports come back
//! in file order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::algorithm::{self, Params};

#[derive(Error, Debug)]
pub enum JobError {
    #[error("malformed job file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// One unit of work from a job file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Job {
    /// Equihash solution check; `n`/`k` fall back to the configured pair
    Verify {
        #[serde(with = "hex::serde")]
        header: Vec<u8>,
        #[serde(with = "hex::serde")]
        nonce: Vec<u8>,
        #[serde(with = "hex::serde")]
        solution: Vec<u8>,
        n: Option<u32>,
        k: Option<u32>,
    },
    /// Proof hash against a packed difficulty
    Target {
        #[serde(with = "hex::serde")]
        solution: Vec<u8>,
        bits: u32,
    },
}

/// Outcome of one job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobReport {
    /// Position in the job file
    pub index: usize,
    pub kind: &'static str,
    /// `Some(valid)` unless the job violated the verifier contract
    pub valid: Option<bool>,
    /// Rule a rejected solution broke
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
    /// Contract violation message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Job {
    pub fn run(&self, index: usize, defaults: Params) -> JobReport {
        match self {
            Job::Verify {
                header,
                nonce,
                solution,
                n,
                k,
            } => {
                let n = n.unwrap_or(defaults.n());
                let k = k.unwrap_or(defaults.k());
                let (valid, rejection, error) =
                    match algorithm::explain(header, nonce, solution, n, k) {
                        Ok(None) => (Some(true), None, None),
                        Ok(Some(rejection)) => (Some(false), Some(rejection.to_string()), None),
                        Err(e) => {
                            debug!(index, %e, "job violated verifier contract");
                            (None, None, Some(e.to_string()))
                        }
                    };
                JobReport {
                    index,
                    kind: "verify",
                    valid,
                    rejection,
                    error,
                }
            }
            Job::Target { solution, bits } => JobReport {
                index,
                kind: "target",
                valid: Some(algorithm::check_target(solution, *bits)),
                rejection: None,
                error: None,
            },
        }
    }
}

pub fn parse_jobs(json: &str) -> Result<Vec<Job>, JobError> {
    Ok(serde_json::from_str(json)?)
}

/// Run `jobs` on a pool of `threads` workers.
pub fn run_jobs(jobs: &[Job], defaults: Params, threads: usize) -> Result<Vec<JobReport>, JobError> {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    info!(jobs = jobs.len(), threads, "running batch");

    Ok(pool.install(|| {
        jobs.par_iter()
            .enumerate()
            .map(|(index, job)| job.run(index, defaults))
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Zero header, zero nonce
    const EH48_5_SOLUTION: &str =
        "0b6fdade515b2174bb637faf1e86e5bf95d01f253a7f33127ce1732795b59b03c29dd726";
    const EH150_5_SOLUTION: &str = "02b4de833dae43e640833145b64200c8276ccb063cabb24c4346131276add1c3\
                                    d32ea23a53b8d51f1509d89a1633412dc68b5d9a03502d63e05a14dfadeeca1a\
                                    3f8928db249de38cb92053b1c00906cbacf83103e35a760389d1320c1bb7b45e\
                                    e4c50fae615451b2";

    fn job_file() -> String {
        let header = "00".repeat(32);
        format!(
            r#"[
                {{"kind": "verify", "header": "{header}", "nonce": "0000000000000000", "solution": "{EH48_5_SOLUTION}", "n": 48, "k": 5}},
                {{"kind": "verify", "header": "{header}", "nonce": "0100000000000000", "solution": "{EH48_5_SOLUTION}", "n": 48, "k": 5}},
                {{"kind": "verify", "header": "{header}", "nonce": "0000000000000000", "solution": "{EH48_5_SOLUTION}"}},
                {{"kind": "target", "solution": "deadbeef", "bits": 0}},
                {{"kind": "target", "solution": "deadbeef", "bits": 3892314112}},
                {{"kind": "verify", "header": "{header}", "nonce": "0000000000000000", "solution": "{EH150_5_SOLUTION}"}}
            ]"#
        )
    }

    #[test]
    fn test_parse_jobs() {
        let jobs = parse_jobs(&job_file()).unwrap();
        assert_eq!(jobs.len(), 6);
        assert_eq!(
            jobs[3],
            Job::Target {
                solution: vec![0xde, 0xad, 0xbe, 0xef],
                bits: 0
            }
        );
        match &jobs[1] {
            Job::Verify { n, k, nonce, .. } => {
                assert_eq!((*n, *k), (Some(48), Some(5)));
                assert_eq!(nonce, &1u64.to_le_bytes().to_vec());
            }
            other => panic!("unexpected job {:?}", other),
        }
        match &jobs[2] {
            Job::Verify { n, k, .. } => assert_eq!((*n, *k), (None, None)),
            other => panic!("unexpected job {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_hex() {
        let bad = r#"[{"kind": "target", "solution": "xyz", "bits": 0}]"#;
        assert!(matches!(parse_jobs(bad), Err(JobError::Parse(_))));
    }

    #[test]
    fn test_run_jobs_in_order() {
        let jobs = parse_jobs(&job_file()).unwrap();
        let reports = run_jobs(&jobs, Params::lookup(150, 5).unwrap(), 2).unwrap();

        let valid: Vec<Option<bool>> = reports.iter().map(|r| r.valid).collect();
        assert_eq!(
            valid,
            vec![Some(true), Some(false), None, Some(true), Some(false), Some(true)]
        );
        assert_eq!(
            reports.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5]
        );
        assert_eq!(reports[1].rejection.as_deref(), Some("no collision at round 1"));
        assert!(reports[2].error.as_deref().unwrap().contains("expected 104"));
    }

    #[test]
    fn test_report_json_skips_empty_fields() {
        let report = JobReport {
            index: 0,
            kind: "target",
            valid: Some(true),
            rejection: None,
            error: None,
        };
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"index":0,"kind":"target","valid":true}"#
        );
    }
}
