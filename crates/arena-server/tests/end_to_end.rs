// crates/arena-server/tests/end_to_end.rs
use std::net::SocketAddr;
use std::time::Duration;

use arena_core::{InputMessage, OutputMessage, Symbol, OPPONENT_DISCONNECTED};
use arena_protocol::{decode_output, encode_input};
use arena_server::config::Config;
use arena_server::server;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

async fn start_server(max_clients: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let config = Config {
        bind_addr: addr.ip().to_string(),
        port: addr.port(),
        max_clients,
    };
    tokio::spawn(async move {
        let _ = server::serve(listener, config).await;
    });
    addr
}

struct TestClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.expect("connect");
        let (read_half, writer) = stream.into_split();
        TestClient {
            lines: BufReader::new(read_half).lines(),
            writer,
        }
    }

    async fn send_line(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.expect("write");
        self.writer.write_all(b"\n").await.expect("write");
    }

    async fn send(&mut self, msg: InputMessage) {
        let line = encode_input(&msg).expect("encode");
        self.send_line(&line).await;
    }

    async fn recv_line(&mut self) -> Option<String> {
        timeout(WAIT, self.lines.next_line())
            .await
            .expect("timed out waiting for server")
            .expect("read")
    }

    async fn recv(&mut self) -> OutputMessage {
        let line = self.recv_line().await.expect("server closed connection");
        decode_output(&line).expect("decode")
    }

    /// Nothing arrives within a short grace period.
    async fn assert_silent(&mut self) {
        let res = timeout(Duration::from_millis(200), self.lines.next_line()).await;
        assert!(res.is_err(), "unexpected message: {:?}", res);
    }
}

/// Join two JSON clients and return them as (x, o).
async fn paired(addr: SocketAddr) -> (TestClient, TestClient) {
    let mut a = TestClient::connect(addr).await;
    let mut b = TestClient::connect(addr).await;
    a.send(InputMessage::Join).await;
    b.send(InputMessage::Join).await;

    let sa = a.recv().await;
    let sb = b.recv().await;
    match (sa, sb) {
        (OutputMessage::Start(x), OutputMessage::Start(o)) if x.symbol == Symbol::X => {
            assert!(x.turn);
            assert_eq!(o.symbol, Symbol::O);
            assert!(!o.turn);
            (a, b)
        }
        (OutputMessage::Start(o), OutputMessage::Start(x)) => {
            assert_eq!(x.symbol, Symbol::X);
            assert!(x.turn);
            assert_eq!(o.symbol, Symbol::O);
            assert!(!o.turn);
            (b, a)
        }
        other => panic!("expected two start messages, got {:?}", other),
    }
}

#[tokio::test]
async fn json_clients_play_to_a_win() {
    let addr = start_server(16).await;
    let (mut x, mut o) = paired(addr).await;

    let script = [(true, 0), (false, 3), (true, 1), (false, 4), (true, 2)];
    for (x_moves, index) in script {
        let mover = if x_moves { &mut x } else { &mut o };
        mover.send(InputMessage::move_to(index)).await;

        let (ux, uo) = (x.recv().await, o.recv().await);
        let (OutputMessage::Update(ux), OutputMessage::Update(uo)) = (ux, uo) else {
            panic!("expected updates after move {index}");
        };
        assert_eq!(ux.board, uo.board);
        assert_eq!(ux.turn, !x_moves);
        assert_eq!(uo.turn, x_moves);
    }

    assert_eq!(x.recv().await, OutputMessage::Win(Symbol::X));
    assert_eq!(o.recv().await, OutputMessage::Win(Symbol::X));

    // The session is gone: further moves are ignored.
    o.send(InputMessage::move_to(5)).await;
    o.assert_silent().await;
    x.assert_silent().await;
}

#[tokio::test]
async fn illegal_moves_produce_no_messages() {
    let addr = start_server(16).await;
    let (mut x, mut o) = paired(addr).await;

    o.send(InputMessage::move_to(0)).await; // out of turn
    x.send(InputMessage::move_to(9)).await; // out of range
    x.send_line("not json at all").await; // malformed, dropped
    x.assert_silent().await;
    o.assert_silent().await;

    x.send(InputMessage::move_to(4)).await;
    assert!(matches!(x.recv().await, OutputMessage::Update(_)));
    assert!(matches!(o.recv().await, OutputMessage::Update(_)));
}

#[tokio::test]
async fn disconnect_notifies_the_opponent() {
    let addr = start_server(16).await;
    let (x, mut o) = paired(addr).await;

    drop(x);

    assert_eq!(o.recv().await, OutputMessage::status(OPPONENT_DISCONNECTED));
    o.send(InputMessage::move_to(0)).await;
    o.assert_silent().await;
}

#[tokio::test]
async fn text_clients_get_text_replies() {
    let addr = start_server(16).await;
    let mut a = TestClient::connect(addr).await;
    let mut b = TestClient::connect(addr).await;

    a.send_line("J").await;
    b.send_line("J").await;

    let mut starts = vec![
        a.recv_line().await.expect("start"),
        b.recv_line().await.expect("start"),
    ];
    starts.sort();
    assert_eq!(starts, vec!["S, O, 0".to_string(), "S, X, 1".to_string()]);
}

#[tokio::test]
async fn connections_over_the_limit_are_dropped() {
    let addr = start_server(1).await;
    let mut first = TestClient::connect(addr).await;
    let mut second = TestClient::connect(addr).await;

    assert_eq!(second.recv_line().await, None);

    // The admitted client is still served.
    first.send(InputMessage::Join).await;
    first.assert_silent().await;
}
