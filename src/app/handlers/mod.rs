pub mod acquisition;
pub mod device;
pub mod recording;

pub use acquisition::AcquisitionHandler;
pub use device::DeviceHandler;
pub use recording::RecordingHandler;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;
    use std::rc::Rc;

    use crate::app::app_core::GSensorApp;
    use crate::config::ConfigManager;
    use crate::serial::LineSource;
    use crate::session::Session;

    type Shared<T> = Rc<RefCell<T>>;

    /// 可以在交给 app 之后继续查看的假设备
    struct FakeDevice {
        incoming: Shared<VecDeque<io::Result<String>>>,
        sent: Shared<Vec<String>>,
    }

    impl LineSource for FakeDevice {
        fn next_line(&mut self) -> io::Result<Option<String>> {
            self.incoming.borrow_mut().pop_front().transpose()
        }

        fn send_command(&mut self, command: &[u8]) -> io::Result<()> {
            self.sent.borrow_mut().push(String::from_utf8_lossy(command).into_owned());
            Ok(())
        }
    }

    fn app_with_device() -> (GSensorApp, Shared<VecDeque<io::Result<String>>>, Shared<Vec<String>>) {
        let incoming: Shared<VecDeque<io::Result<String>>> = Rc::default();
        let sent: Shared<Vec<String>> = Rc::default();
        let device = FakeDevice {
            incoming: Rc::clone(&incoming),
            sent: Rc::clone(&sent),
        };
        let app = GSensorApp::new(ConfigManager::new(), Session::new(500), Some(Box::new(device)), None);
        (app, incoming, sent)
    }

    fn feed(incoming: &Shared<VecDeque<io::Result<String>>>, first_ts: i64, count: i64) {
        let mut queue = incoming.borrow_mut();
        for i in 0..count {
            queue.push_back(Ok(format!("{},0.1,0.2,0.98,1.0,1.5\n", first_ts + i * 5)));
        }
    }

    #[test]
    fn tick_drains_device_and_builds_view() {
        let (mut app, incoming, _) = app_with_device();
        AcquisitionHandler::handle_tick(&mut app);
        assert!(app.state.frame.view.is_none());

        feed(&incoming, 1000, 10);
        AcquisitionHandler::handle_tick(&mut app);
        assert_eq!(app.state.frame.snapshot.len(), 10);
        let view = app.state.frame.view.clone().unwrap();
        assert_eq!(view.latest_peak, 1.5);
        assert_eq!(view.magnitude_max, 5.0);
    }

    #[test]
    fn recording_round_trip_switches_rates_and_exports() {
        let (mut app, incoming, sent) = app_with_device();

        RecordingHandler::toggle_recording(&mut app);
        assert!(app.state.session.is_recording());
        feed(&incoming, 2000, 50);
        AcquisitionHandler::handle_tick(&mut app);
        RecordingHandler::toggle_recording(&mut app);

        assert_eq!(*sent.borrow(), vec!["s2".to_string(), "s1".to_string()]);
        assert_eq!(app.state.session.recorder().len(), 50);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");
        assert_eq!(RecordingHandler::save_to_path(&mut app, &path).unwrap(), 50);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Sample Rate: 200 Hz"));
        let rows: Vec<&str> = content
            .lines()
            .filter(|l| !l.starts_with('#'))
            .skip(1)
            .collect();
        assert_eq!(rows.len(), 50);
        assert!(rows[0].starts_with("2000,"));
        assert!(!app.state.status.is_error);
    }

    #[test]
    fn device_error_drops_link_and_reports_partial_recording() {
        let (mut app, incoming, _) = app_with_device();
        RecordingHandler::toggle_recording(&mut app);
        feed(&incoming, 0, 7);
        incoming
            .borrow_mut()
            .push_back(Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged")));

        AcquisitionHandler::handle_tick(&mut app);

        assert!(!app.state.connection.is_connected());
        assert!(!app.state.session.is_recording());
        assert!(app.state.status.is_error);
        assert!(app.state.status.message.contains("7 samples"));
        // 会话本身保留
        assert_eq!(app.state.session.buffer().len(), 7);
        assert_eq!(app.state.get_status_summary(), "Disconnected");
    }

    #[test]
    fn saving_empty_log_reports_error() {
        let (mut app, _, _) = app_with_device();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing.csv");
        assert!(RecordingHandler::save_to_path(&mut app, &path).is_err());
        assert!(app.state.status.is_error);
        assert!(!path.exists());
    }

    #[test]
    fn clear_restarts_time_axis() {
        let (mut app, incoming, _) = app_with_device();
        feed(&incoming, 1000, 5);
        AcquisitionHandler::handle_tick(&mut app);
        DeviceHandler::clear_data(&mut app);
        assert_eq!(app.state.session.total_samples(), 0);

        feed(&incoming, 50_000, 1);
        AcquisitionHandler::handle_tick(&mut app);
        assert_eq!(app.state.frame.snapshot.time, vec![0.0]);
    }

    #[test]
    fn reset_peak_sends_r() {
        let (mut app, _, sent) = app_with_device();
        DeviceHandler::reset_peak(&mut app);
        assert_eq!(*sent.borrow(), vec!["r".to_string()]);
    }

    #[test]
    fn commands_without_link_fail_quietly() {
        let mut app = GSensorApp::new(ConfigManager::new(), Session::new(10), None, None);
        DeviceHandler::reset_peak(&mut app);
        assert!(app.state.status.is_error);
    }

    #[test]
    fn run_duration_sets_deadline() {
        let app = GSensorApp::new(
            ConfigManager::new(),
            Session::new(10),
            None,
            Some(std::time::Duration::from_secs(5)),
        );
        assert!(app.state.deadline.is_some());
    }

    #[test]
    fn huge_run_duration_runs_indefinitely() {
        let app = GSensorApp::new(ConfigManager::new(), Session::new(10), None, Some(std::time::Duration::MAX));
        assert!(app.state.deadline.is_none());
    }
}
