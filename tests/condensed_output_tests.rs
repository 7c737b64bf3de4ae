//! Output capture tests for the condensed reporter.
//!
//! Drives the reporter through injected capture sinks and asserts on the
//! exact bytes written: banner printing and erasure, skip suppression, ok
//! gating, delegation labels, item labels, verbose dumps, no_log scrubbing,
//! warnings, diffs, and include announcements.

mod common;

use common::{capture_reporter, clear_sequence};
use pretty_assertions::assert_eq;
use serde_json::json;

use condensed::banner::BannerState;
use condensed::events::{DiffInfo, ResultInfo, TaskInfo};
use condensed::handler::EventHandler;
use condensed::reporters::CondensedConfig;

fn plain_config() -> CondensedConfig {
    CondensedConfig::default().without_color()
}

fn task(name: &str, uuid: &str) -> TaskInfo {
    TaskInfo::new(name, "shell").with_uuid(uuid)
}

// ============================================================================
// Banners
// ============================================================================

#[test]
fn banner_prints_once_for_multiple_hosts() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let install = task("Install package", "t1");

    reporter.on_task_start(&install).unwrap();
    reporter
        .on_host_ok(&install, &ResultInfo::changed("web1"))
        .unwrap();
    reporter
        .on_host_ok(&install, &ResultInfo::changed("web2"))
        .unwrap();

    assert_eq!(out.output(), "\nTASK [Install package]\n    web1\n    web2");
    assert_eq!(out.count_occurrences("TASK ["), 1);
}

#[test]
fn unconfirmed_banner_is_erased_by_the_next_one() {
    let (mut reporter, out, _) = capture_reporter(plain_config());

    reporter.on_task_start(&task("First", "t1")).unwrap();
    reporter.on_task_start(&task("Second", "t2")).unwrap();

    let clear = clear_sequence(80);
    assert_eq!(out.count_occurrences(&clear), 1);
    // The replacement banner starts right where the erased line began.
    assert!(out.output().ends_with(&format!("{}TASK [Second]", clear)));
    assert_eq!(reporter.banners().state("t1"), None);
    assert_eq!(reporter.banners().state("t2"), Some(BannerState::Pending));
}

#[test]
fn confirmed_banner_survives_the_next_one() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let first = task("First", "t1");

    reporter.on_task_start(&first).unwrap();
    reporter
        .on_host_ok(&first, &ResultInfo::changed("web1"))
        .unwrap();
    reporter.on_task_start(&task("Second", "t2")).unwrap();

    assert_eq!(out.count_occurrences(&clear_sequence(80)), 0);
    assert_eq!(
        out.output(),
        "\nTASK [First]\n    web1\nTASK [Second]"
    );
}

#[test]
fn out_of_order_result_reprints_its_banner() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let first = task("First", "t1");
    let second = task("Second", "t2");

    reporter.on_task_start(&first).unwrap();
    reporter
        .on_host_ok(&first, &ResultInfo::changed("web1"))
        .unwrap();
    reporter.on_task_start(&second).unwrap();
    reporter
        .on_host_ok(&second, &ResultInfo::changed("web1"))
        .unwrap();

    // A straggler for the first task arrives after the second banner.
    reporter
        .on_host_ok(&first, &ResultInfo::changed("web2"))
        .unwrap();

    assert_eq!(out.count_occurrences("TASK [First]"), 2);
    assert!(out.output().ends_with("\nTASK [First]\n    web2"));
}

#[test]
fn task_path_printed_at_high_verbosity() {
    let mut config = plain_config();
    config.verbosity = 2;
    let (mut reporter, out, _) = capture_reporter(config);

    let located = task("Install package", "t1").with_path("roles/web/tasks/main.yml:7");
    reporter.on_task_start(&located).unwrap();

    assert!(out.contains("task path: roles/web/tasks/main.yml:7"));

    let (mut quiet, out, _) = capture_reporter(plain_config());
    let located = task("Install package", "t1").with_path("roles/web/tasks/main.yml:7");
    quiet.on_task_start(&located).unwrap();
    assert!(!out.contains("task path:"));
}

#[test]
fn banner_echoes_args_when_enabled() {
    let mut config = plain_config();
    config.display_args_to_stdout = true;
    let (mut reporter, out, _) = capture_reporter(config);

    let mut args = indexmap::IndexMap::new();
    args.insert("name".to_string(), json!("nginx"));
    args.insert("state".to_string(), json!("present"));
    let install = task("Install package", "t1").with_args(args);

    reporter.on_task_start(&install).unwrap();
    assert_eq!(out.output(), "\nTASK [Install package name=nginx, state=present]");
}

// ============================================================================
// Skip Suppression
// ============================================================================

#[test]
fn skipped_results_produce_no_output_and_no_state_change() {
    let (mut reporter, out, err) = capture_reporter(plain_config());
    let install = task("Install package", "t1");

    reporter.on_task_start(&install).unwrap();
    let banner_output = out.output();

    reporter
        .on_host_skipped(&install, &ResultInfo::skipped("web1"))
        .unwrap();
    reporter
        .on_item_skipped(&install, &ResultInfo::skipped("web1").with_item(json!("x")))
        .unwrap();

    assert_eq!(out.output(), banner_output);
    assert!(err.is_empty());
    // The banner is still unconfirmed and will be erased by the next one.
    assert_eq!(reporter.banners().state("t1"), Some(BannerState::Pending));
}

#[test]
fn fully_skipped_task_leaves_no_trace_after_the_next_banner() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let skipped_everywhere = task("Conditional step", "t1");

    reporter.on_task_start(&skipped_everywhere).unwrap();
    reporter
        .on_host_skipped(&skipped_everywhere, &ResultInfo::skipped("web1"))
        .unwrap();
    reporter.on_task_start(&task("Real step", "t2")).unwrap();

    assert_eq!(
        out.output(),
        format!(
            "\nTASK [Conditional step]{}TASK [Real step]",
            clear_sequence(80)
        )
    );
}

// ============================================================================
// Ok Gating and Colors
// ============================================================================

#[test]
fn changed_results_use_the_changed_color() {
    colored::control::set_override(true);
    let (mut reporter, out, _) = capture_reporter(CondensedConfig::default());
    let install = task("Install package", "t1");

    reporter.on_task_start(&install).unwrap();
    reporter
        .on_host_ok(&install, &ResultInfo::changed("web1"))
        .unwrap();

    // 33 = yellow, the changed color.
    assert!(out.contains("\x1b[33m    web1\x1b[0m"));
}

#[test]
fn unchanged_results_use_the_ok_color() {
    colored::control::set_override(true);
    let (mut reporter, out, _) = capture_reporter(CondensedConfig::default());
    let install = task("Install package", "t1");

    reporter.on_task_start(&install).unwrap();
    reporter
        .on_host_ok(&install, &ResultInfo::ok("web1"))
        .unwrap();

    // 32 = green, the ok color.
    assert!(out.contains("\x1b[32m    web1\x1b[0m"));
}

#[test]
fn unchanged_results_are_silent_when_ok_hosts_hidden() {
    let (mut reporter, out, _) = capture_reporter(plain_config().changes_only());
    let install = task("Install package", "t1");

    reporter.on_task_start(&install).unwrap();
    reporter
        .on_host_ok(&install, &ResultInfo::ok("web1"))
        .unwrap();

    assert_eq!(out.output(), "\nTASK [Install package]");
    // Never confirmed: a later banner will erase this one.
    assert_eq!(reporter.banners().state("t1"), Some(BannerState::Pending));

    reporter
        .on_host_ok(&install, &ResultInfo::changed("web2"))
        .unwrap();
    assert_eq!(out.output(), "\nTASK [Install package]\n    web2");
}

#[test]
fn include_results_print_nothing() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let include = TaskInfo::new("Pull in common tasks", "include_tasks").with_uuid("t1");

    reporter
        .on_host_ok(&include, &ResultInfo::changed("web1"))
        .unwrap();
    reporter
        .on_item_ok(&include, &ResultInfo::ok("web1").with_item(json!("x")))
        .unwrap();

    assert!(out.is_empty());
}

// ============================================================================
// Delegation and Items
// ============================================================================

#[test]
fn delegated_results_show_both_hosts() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let install = task("Install package", "t1");

    reporter.on_task_start(&install).unwrap();
    reporter
        .on_host_ok(
            &install,
            &ResultInfo::changed("web1").with_delegated_host("bastion"),
        )
        .unwrap();

    assert!(out.contains("    web1 -> bastion"));
}

#[test]
fn item_results_carry_their_label() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let deploy = task("Deploy configs", "t1").with_loop();

    reporter.on_task_start(&deploy).unwrap();
    reporter
        .on_item_ok(
            &deploy,
            &ResultInfo::changed("web1").with_item(json!("nginx.conf")),
        )
        .unwrap();
    reporter
        .on_item_ok(
            &deploy,
            &ResultInfo::changed("web1").with_item(json!({"src": "vhosts.conf"})),
        )
        .unwrap();

    assert!(out.contains("    web1 => (item=nginx.conf)"));
    assert!(out.contains(r#"    web1 => (item={"src":"vhosts.conf"})"#));
}

#[test]
fn loop_aggregate_is_processed_per_item() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let deploy = task("Deploy configs", "t1").with_loop();

    let aggregate = ResultInfo::changed("web1").with_items(vec![
        ResultInfo::changed("web1").with_item(json!("a.conf")),
        ResultInfo::skipped("web1").with_item(json!("b.conf")),
        ResultInfo::ok("web1").with_item(json!("c.conf")),
    ]);

    reporter.on_task_start(&deploy).unwrap();
    reporter.on_host_ok(&deploy, &aggregate).unwrap();

    assert!(out.contains("    web1 => (item=a.conf)"));
    assert!(!out.contains("b.conf"));
    assert!(out.contains("    web1 => (item=c.conf)"));
}

// ============================================================================
// Verbose Dumps and Scrubbing
// ============================================================================

#[test]
fn verbose_run_appends_result_dump() {
    let mut config = plain_config();
    config.verbosity = 1;
    let (mut reporter, out, _) = capture_reporter(config);
    let install = task("Install package", "t1");

    reporter.on_task_start(&install).unwrap();
    reporter
        .on_host_ok(&install, &ResultInfo::changed("web1").with_msg("installed"))
        .unwrap();

    assert!(out.contains(r#"    web1 => {"#));
    assert!(out.contains(r#""msg":"installed""#));
}

#[test]
fn verbose_always_dumps_at_zero_verbosity_unless_overridden() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let install = task("Install package", "t1");

    reporter.on_task_start(&install).unwrap();
    reporter
        .on_host_ok(
            &install,
            &ResultInfo::changed("web1")
                .with_msg("details")
                .with_verbose_always(),
        )
        .unwrap();
    assert!(out.contains(r#""msg":"details""#));

    let (mut reporter, out, _) = capture_reporter(plain_config());
    let install = task("Install package", "t1");
    reporter.on_task_start(&install).unwrap();
    reporter
        .on_host_ok(
            &install,
            &ResultInfo::changed("web1")
                .with_msg("details")
                .with_verbose_always()
                .with_verbose_override(),
        )
        .unwrap();
    assert!(!out.contains("details"));
}

#[test]
fn no_log_results_never_leak_their_payload() {
    let mut config = plain_config();
    config.verbosity = 1;
    let (mut reporter, out, _) = capture_reporter(config);
    let secret = TaskInfo::new("Set password", "user")
        .with_uuid("t1")
        .with_no_log();

    reporter.on_task_start(&secret).unwrap();
    reporter
        .on_host_ok(
            &secret,
            &ResultInfo::changed("web1").with_msg("password set to hunter2"),
        )
        .unwrap();

    assert!(!out.contains("hunter2"));
    assert!(out.contains("hidden due to the use of no_log"));
}

#[test]
fn warnings_are_surfaced_on_the_error_stream() {
    let (mut reporter, out, err) = capture_reporter(plain_config());
    let install = task("Install package", "t1");

    reporter.on_task_start(&install).unwrap();
    reporter
        .on_host_ok(
            &install,
            &ResultInfo::changed("web1").with_warning("module is deprecated"),
        )
        .unwrap();

    assert!(err.contains("[WARNING]: module is deprecated"));
    assert!(!out.contains("WARNING"));
}

// ============================================================================
// Diffs
// ============================================================================

#[test]
fn diff_printed_for_changed_result() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let template = task("Render motd", "t1");

    let result = ResultInfo::changed("web1").with_diff(
        DiffInfo::new()
            .with_before("hello\n")
            .with_after("goodbye\n"),
    );
    reporter.on_file_diff(&template, &result).unwrap();

    assert!(out.contains("--- before"));
    assert!(out.contains("-hello"));
    assert!(out.contains("+goodbye"));
}

#[test]
fn diff_suppressed_for_unchanged_result() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let template = task("Render motd", "t1");

    let result = ResultInfo::ok("web1")
        .with_diff(DiffInfo::new().with_before("a\n").with_after("b\n"));
    reporter.on_file_diff(&template, &result).unwrap();

    assert!(out.is_empty());
}

#[test]
fn diff_text_is_trimmed() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let template = task("Render motd", "t1");

    let result = ResultInfo::changed("web1")
        .with_diff(DiffInfo::new().with_prepared("\n\n--- x\n+++ y\n+line\n\n"));
    reporter.on_file_diff(&template, &result).unwrap();

    assert_eq!(out.output(), "\n--- x\n+++ y\n+line");
}

#[test]
fn loop_aggregate_diffs_printed_per_changed_item() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let deploy = task("Deploy configs", "t1").with_loop();

    let aggregate = ResultInfo::changed("web1").with_items(vec![
        ResultInfo::changed("web1").with_diff(DiffInfo::new().with_prepared("diff-one")),
        ResultInfo::ok("web1").with_diff(DiffInfo::new().with_prepared("diff-two")),
        ResultInfo::changed("web1"),
    ]);
    reporter.on_file_diff(&deploy, &aggregate).unwrap();

    assert!(out.contains("diff-one"));
    assert!(!out.contains("diff-two"));
}

#[test]
fn no_log_suppresses_diffs() {
    let (mut reporter, out, _) = capture_reporter(plain_config());
    let secret = task("Render credentials", "t1").with_no_log();

    let result = ResultInfo::changed("web1")
        .with_diff(DiffInfo::new().with_prepared("-old_secret\n+new_secret"));
    reporter.on_file_diff(&secret, &result).unwrap();

    assert!(out.is_empty());
}

// ============================================================================
// Includes
// ============================================================================

#[test]
fn include_file_announcement() {
    let (mut reporter, out, _) = capture_reporter(plain_config());

    reporter
        .on_include_file(
            "tasks/hardening.yml",
            &["web1".to_string(), "web2".to_string()],
        )
        .unwrap();

    assert_eq!(
        out.output(),
        "\nINCLUDE TASKS\n    web1, web2 => tasks/hardening.yml"
    );
}
