use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::thread;

use schoolid_core::domain::{reason, LookupQuery, LookupResult};
use schoolid_lookup::LookupStrategy;

use crate::app::{App, FIELD_STUDENT_NO};
use crate::clipboard;

#[derive(Debug, Clone)]
pub enum Action {
    Lookup(LookupQuery),
    Clear,
    CopyId,
    ResetRequest,
}

/// Applies an action to the app. Failures (an unavailable clipboard helper,
/// say) surface in-band as Error statuses rather than as return values.
pub fn execute_action(app: &mut App, strategy: &Arc<dyn LookupStrategy>, action: Action) {
    match action {
        Action::Lookup(query) => {
            let (tx, rx) = mpsc::channel();
            let strategy = Arc::clone(strategy);
            thread::spawn(move || {
                let _ = tx.send(strategy.resolve(&query));
            });
            app.pending = Some(rx);
        }
        Action::Clear => {
            app.student_no.clear();
            app.name.clear();
            app.focus = FIELD_STUDENT_NO;
            app.display = app.display.cleared();
        }
        Action::CopyId => match app.display.result.clone() {
            Some(id) => match clipboard::copy(&id) {
                Ok(()) => app.display = app.display.copied(),
                Err(err) => app.display = app.display.copy_failed(&err.to_string()),
            },
            None => app.display = app.display.copy_failed("nothing to copy yet"),
        },
        Action::ResetRequest => {
            app.display = app.display.reset_requested();
        }
    }
}

/// Checks the in-flight lookup, applying its result on the UI thread. A
/// dropped sender (worker panic) is reported as a network error rather than
/// left hanging.
pub fn poll_lookup(app: &mut App) {
    let Some(rx) = &app.pending else {
        return;
    };
    match rx.try_recv() {
        Ok(result) => {
            app.display = app.display.resolved(&result);
            app.pending = None;
        }
        Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Disconnected) => {
            app.display = app
                .display
                .resolved(&LookupResult::transport(reason::NETWORK_ERROR));
            app.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{execute_action, poll_lookup, Action};
    use crate::app::App;
    use schoolid_core::domain::{AccountRecord, LookupQuery, LookupResult};
    use schoolid_core::rules::{StatusKind, RESULT_PLACEHOLDER};
    use schoolid_lookup::{LocalTable, LookupStrategy};
    use std::sync::Arc;
    use std::time::Duration;

    fn strategy() -> Arc<dyn LookupStrategy> {
        let mut table = LocalTable::new(Duration::ZERO);
        table.insert("20301", "홍길동", "s20301@school.edu");
        Arc::new(table)
    }

    fn wait_for_result(app: &mut App) {
        for _ in 0..100 {
            poll_lookup(app);
            if app.pending.is_none() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("lookup did not complete");
    }

    #[test]
    fn lookup_runs_off_thread_and_resolves() {
        let mut app = App::new("local");
        let query = LookupQuery::new("20301", "홍길동").expect("query");
        execute_action(&mut app, &strategy(), Action::Lookup(query));
        assert!(app.pending.is_some());

        wait_for_result(&mut app);
        assert_eq!(app.display.status.kind, StatusKind::Success);
        assert_eq!(app.display.result_text(), "s20301@school.edu");
    }

    #[test]
    fn clear_restores_idle_and_placeholder() {
        let mut app = App::new("local");
        app.student_no = "20301".to_string();
        app.name = "홍길동".to_string();
        app.display = app
            .display
            .resolved(&LookupResult::Found(AccountRecord::new("s20301@school.edu")));

        execute_action(&mut app, &strategy(), Action::Clear);
        assert_eq!(app.display.status.kind, StatusKind::Idle);
        assert_eq!(app.display.result_text(), RESULT_PLACEHOLDER);
        assert!(app.student_no.is_empty());
        assert!(app.name.is_empty());
    }

    #[test]
    fn copy_without_result_reports_an_error() {
        let mut app = App::new("local");
        execute_action(&mut app, &strategy(), Action::CopyId);
        assert_eq!(app.display.status.kind, StatusKind::Error);
    }

    #[test]
    fn reset_request_only_touches_the_status() {
        let mut app = App::new("local");
        app.display = app
            .display
            .resolved(&LookupResult::Found(AccountRecord::new("s20301@school.edu")));

        execute_action(&mut app, &strategy(), Action::ResetRequest);
        assert_eq!(app.display.status.kind, StatusKind::Success);
        assert_eq!(app.display.result_text(), "s20301@school.edu");
    }
}
