//! Exit-status and end-to-end tests for the relay binaries

mod test_utils;

use msgrelay::relay::Transport;
use std::process::Command;
use test_utils::*;

const CLIENT_BIN: &str = env!("CARGO_BIN_EXE_relay-client");
const SERVER_BIN: &str = env!("CARGO_BIN_EXE_relay-server");

#[test]
fn test_client_send_without_filename_exits_1() {
    let dir = temp_dir();

    let output = Command::new(CLIENT_BIN)
        .current_dir(dir.path())
        .args(["127.0.0.1", "9", "tcp", "send"])
        .output()
        .expect("Failed to run client");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Filename must be supplied"));

    let log = std::fs::read_to_string(dir.path().join("client.log")).unwrap();
    assert!(log.contains("Filename must be supplied"));
}

#[test]
fn test_client_invalid_mode_exits_1() {
    let dir = temp_dir();

    let output = Command::new(CLIENT_BIN)
        .current_dir(dir.path())
        .args(["127.0.0.1", "9", "udp", "peek"])
        .output()
        .expect("Failed to run client");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid mode 'peek'"));
}

#[test]
fn test_server_rejects_unknown_socktype() {
    let dir = temp_dir();

    let output = Command::new(SERVER_BIN)
        .current_dir(dir.path())
        .args(["9999", "sctp"])
        .output()
        .expect("Failed to run server");

    assert!(!output.status.success());
}

#[test]
fn test_server_bind_failure_exits_nonzero() {
    let dir = temp_dir();
    let taken = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port().to_string();

    let output = Command::new(SERVER_BIN)
        .current_dir(dir.path())
        .args([port.as_str(), "udp", "--host", "127.0.0.1"])
        .output()
        .expect("Failed to run server");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to start server"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_client_binary_round_trip() {
    let dir = temp_dir();
    let file = write_temp_file(dir.path(), "note.txt", "hello world");

    let server = start_server(Transport::Tcp).await;
    let port = server.local_addr().port().to_string();

    let send = tokio::process::Command::new(CLIENT_BIN)
        .current_dir(dir.path())
        .args(["127.0.0.1", port.as_str(), "TCP", "Send"])
        .arg(&file)
        .output()
        .await
        .expect("Failed to run client");
    assert!(send.status.success());
    assert!(wait_for_len(server.queue(), 1, 5).await);

    let receive = tokio::process::Command::new(CLIENT_BIN)
        .current_dir(dir.path())
        .args(["127.0.0.1", port.as_str(), "tcp", "receive"])
        .output()
        .await
        .expect("Failed to run client");
    assert!(receive.status.success());

    let log = std::fs::read_to_string(dir.path().join("client.log")).unwrap();
    assert!(log.contains("Sent: 11 bytes"));
    assert!(log.contains("hello world"));
    assert!(server.queue().is_empty().await);

    server.shutdown().await;
}

#[cfg(unix)]
#[test]
fn test_server_interrupt_exits_cleanly() {
    use std::process::Stdio;
    use std::time::{Duration, Instant};

    let dir = temp_dir();
    let log_path = dir.path().join("server.log");

    let mut child = Command::new(SERVER_BIN)
        .current_dir(dir.path())
        .args(["0", "tcp", "--host", "127.0.0.1"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to run server");

    let start = Instant::now();
    let mut started = false;
    while start.elapsed() < Duration::from_secs(10) {
        let log = std::fs::read_to_string(&log_path).unwrap_or_default();
        if log.contains("Server started on") {
            started = true;
            break;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    if !started {
        let _ = child.kill();
        panic!("server never reported it was listening");
    }

    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .expect("Failed to send SIGINT");
    assert!(status.success());

    let exit = child.wait().expect("Failed to wait for server");
    assert_eq!(exit.code(), Some(0));

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Shutting down server"));
    assert!(log.contains("TCP listener shutting down"));
}
