use pretty_assertions::assert_eq;

use super::*;

fn err(origin: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::NameCollision, "collision").with_origin(origin)
}

#[test]
fn dedup_drops_same_code_and_origin() {
    let mut queue = DiagnosticQueue::new();
    queue.add(err("app.Circle"));
    queue.add(err("app.Circle"));
    queue.add(err("app.Square"));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn dedup_keeps_same_code_with_different_origins() {
    let mut queue = DiagnosticQueue::new();
    queue.add(err("a"));
    queue.add(err("b"));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn error_limit_truncates() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: false,
    });
    for origin in ["a", "b", "c", "d"] {
        queue.add(err(origin));
    }
    assert_eq!(queue.error_count(), 2);
    assert_eq!(queue.truncated(), 2);
    assert_eq!(queue.flush().len(), 2);
}

#[test]
fn warnings_are_never_limited() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 1,
        deduplicate: false,
    });
    for _ in 0..5 {
        queue.add(Diagnostic::warning(ErrorCode::EmptyRegistry, "empty"));
    }
    assert_eq!(queue.warning_count(), 5);
    assert!(!queue.has_errors());
}

#[test]
fn flush_orders_by_origin_then_code() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    queue.add(err("z.Late"));
    queue.add(Diagnostic::warning(ErrorCode::EmptyRegistry, "empty").with_origin("a.Early"));
    queue.add(err("a.Early"));

    let flushed = queue.flush();
    let keys: Vec<(Option<&str>, ErrorCode)> = flushed
        .iter()
        .map(|d| (d.origin.as_deref(), d.code))
        .collect();
    assert_eq!(
        keys,
        vec![
            (Some("a.Early"), ErrorCode::EmptyRegistry),
            (Some("a.Early"), ErrorCode::NameCollision),
            (Some("z.Late"), ErrorCode::NameCollision),
        ]
    );
}

#[test]
fn flush_is_independent_of_insertion_order() {
    let diags = [err("b"), err("a"), err("c")];

    let mut forward = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    forward.extend(diags.clone());
    let mut reverse = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    reverse.extend(diags.into_iter().rev());

    assert_eq!(forward.flush(), reverse.flush());
}
