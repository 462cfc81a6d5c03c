use std::time::Duration;

use battleship_client::{
    ClientConfig, FrameCodec, ScriptedInput, SessionEnd, SessionLoop, ShutdownToken,
    TcpTransport, Transport,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[tokio::test(flavor = "multi_thread")]
async fn test_split_frames_over_tcp() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        socket.write_all(b"LOGIN|O").await.unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        socket.write_all(b"K\r\nYOUR_TURN|go\n").await.unwrap();
        socket.shutdown().await.unwrap();
    });

    let mut client = TcpTransport::connect(addr).await?;
    let mut codec = FrameCodec::new();
    let mut frames = Vec::new();
    let mut buf = [0u8; 64];
    loop {
        let n = client.recv(&mut buf).await?;
        if n == 0 {
            break;
        }
        frames.extend(codec.feed(&buf[..n]).unwrap());
    }
    assert_eq!(frames, vec!["LOGIN|OK", "YOUR_TURN|go"]);
    server.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_after_close_fails() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut got = Vec::new();
        socket.read_to_end(&mut got).await.unwrap();
        got
    });

    let mut client = TcpTransport::connect(addr).await?;
    client.send(b"QUIT|\n").await?;
    client.close().await?;
    assert!(client.send(b"3,4\n").await.is_err());
    assert_eq!(server.await?, b"QUIT|\n");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connect_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    assert!(TcpTransport::connect(addr).await.is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_session_over_tcp() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut codec = FrameCodec::new();
        let mut lines = Vec::new();
        let mut buf = [0u8; 64];
        while lines.len() < 2 {
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "client hung up early");
            lines.extend(codec.feed(&buf[..n]).unwrap());
            if lines.len() == 1 {
                socket
                    .write_all(b"LOGIN|OK\nYOUR_TURN|\n")
                    .await
                    .unwrap();
            }
        }
        socket
            .write_all(b"RESULT|SUNK\nGAME_OVER|YOU WIN\n")
            .await
            .unwrap();
        lines
    });

    let config = ClientConfig {
        expect_placement: false,
        seed: Some(3),
        ..ClientConfig::new("bob")
    };
    let transport = TcpTransport::connect(addr).await?;
    let input = ScriptedInput::new(["5 5"]).then_stall();
    let mut session = SessionLoop::new(
        Box::new(transport),
        Box::new(input),
        &config,
        ShutdownToken::new(),
    );
    session.login().await?;
    assert_eq!(session.run().await?, SessionEnd::GameOver("YOU WIN".into()));
    assert_eq!(server.await?, vec!["LOGIN|bob", "5,5"]);
    Ok(())
}
