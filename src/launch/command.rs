//! Argument-list builders for the external bag tools
//!
//! Each builder produces the exact argv the corresponding tool expects:
//!
//! - Play: `rosbag play <path> -q [--clock] -r <rate> -s <start> [-l]
//!   --topics <name>... __name:=<token>`
//! - Record: `rosbag record <name>... __name:=<token>`
//! - Filter: `rosbag filter <src> <dst> "topic == '<t1>' or ..."`
//!
//! The `__name:=` argument registers the process under the generated
//! token so a later kill request can target it by name.

use std::path::Path;
use std::time::Duration;

use crate::config::PlaybackConfig;
use crate::types::ProcessToken;

use super::SpawnSpec;

/// Executable that plays, records, and filters bags
pub const ROSBAG_PROGRAM: &str = "rosbag";

/// Executable that kills a named node
pub const ROSNODE_PROGRAM: &str = "rosnode";

/// Build the spawn descriptor for a play process
pub fn play_spawn<I>(
    bag_path: &Path,
    config: &PlaybackConfig,
    start_offset: Duration,
    topics: I,
    token: &ProcessToken,
) -> SpawnSpec
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut args = vec![
        "play".to_string(),
        bag_path.display().to_string(),
        "-q".to_string(),
    ];

    if config.publish_clock {
        args.push("--clock".to_string());
    }

    args.push("-r".to_string());
    args.push(format!("{}", config.rate));

    args.push("-s".to_string());
    args.push(format!("{}", start_offset.as_secs_f64()));

    if config.loop_playback {
        args.push("-l".to_string());
    }

    args.push("--topics".to_string());
    args.extend(topics.into_iter().map(|t| t.as_ref().to_string()));

    args.push(name_arg(token));
    SpawnSpec::new(ROSBAG_PROGRAM, args)
}

/// Build the spawn descriptor for a record process
pub fn record_spawn<I>(topics: I, token: &ProcessToken) -> SpawnSpec
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut args = vec!["record".to_string()];
    args.extend(topics.into_iter().map(|t| t.as_ref().to_string()));
    args.push(name_arg(token));
    SpawnSpec::new(ROSBAG_PROGRAM, args)
}

/// Build the spawn descriptor for a filter (save-subset) process
pub fn filter_spawn<I>(src: &Path, dst: &Path, topics: I) -> SpawnSpec
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    SpawnSpec::new(
        ROSBAG_PROGRAM,
        vec![
            "filter".to_string(),
            src.display().to_string(),
            dst.display().to_string(),
            filter_predicate(topics),
        ],
    )
}

/// Build the kill argv targeting a named process
pub fn kill_args(target: &ProcessToken) -> Vec<String> {
    vec!["kill".to_string(), target.kill_target()]
}

/// The filter expression matching any of the given topic names
///
/// `["/a", "/b"]` becomes `topic == '/a' or topic == '/b'`. An empty
/// list produces an empty predicate; callers refuse the save before
/// reaching that point.
pub fn filter_predicate<I>(topics: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    topics
        .into_iter()
        .map(|t| format!("topic == '{}'", t.as_ref()))
        .collect::<Vec<_>>()
        .join(" or ")
}

fn name_arg(token: &ProcessToken) -> String {
    format!("__name:={}", token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> ProcessToken {
        ProcessToken::new(s)
    }

    #[test]
    fn test_play_spawn_full_config() {
        let config = PlaybackConfig::new().with_rate(2.0).with_loop(true);
        let spec = play_spawn(
            Path::new("/data/run.bag"),
            &config,
            Duration::from_secs_f64(1.5),
            &["/odom", "/tf"],
            &token("play_7"),
        );

        assert_eq!(spec.program, ROSBAG_PROGRAM);
        assert_eq!(
            spec.args,
            vec![
                "play",
                "/data/run.bag",
                "-q",
                "--clock",
                "-r",
                "2",
                "-s",
                "1.5",
                "-l",
                "--topics",
                "/odom",
                "/tf",
                "__name:=play_7",
            ]
        );
    }

    #[test]
    fn test_play_spawn_omits_optional_flags() {
        let config = PlaybackConfig::new().with_clock(false);
        let spec = play_spawn(
            Path::new("/data/run.bag"),
            &config,
            Duration::ZERO,
            &[] as &[&str],
            &token("play_8"),
        );

        assert!(!spec.args.contains(&"--clock".to_string()));
        assert!(!spec.args.contains(&"-l".to_string()));
        assert_eq!(spec.args[spec.args.len() - 2], "--topics");
        assert_eq!(spec.args.last().unwrap(), "__name:=play_8");
    }

    #[test]
    fn test_record_spawn() {
        let spec = record_spawn(&["/scan"], &token("record_3"));
        assert_eq!(spec.program, ROSBAG_PROGRAM);
        assert_eq!(spec.args, vec!["record", "/scan", "__name:=record_3"]);
    }

    #[test]
    fn test_filter_predicate_joins_with_or() {
        assert_eq!(
            filter_predicate(["/a", "/b"]),
            "topic == '/a' or topic == '/b'"
        );
        assert_eq!(filter_predicate(["/only"]), "topic == '/only'");

        let none: [&str; 0] = [];
        assert_eq!(filter_predicate(none), "");
    }

    #[test]
    fn test_filter_spawn() {
        let spec = filter_spawn(
            Path::new("/data/run.bag"),
            Path::new("/exports/subset.bag"),
            &["/a", "/b"],
        );
        assert_eq!(
            spec.args,
            vec![
                "filter",
                "/data/run.bag",
                "/exports/subset.bag",
                "topic == '/a' or topic == '/b'",
            ]
        );
    }

    #[test]
    fn test_kill_args() {
        assert_eq!(kill_args(&token("play_9")), vec!["kill", "/play_9"]);
    }
}
