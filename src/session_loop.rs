//! The session driver.
//!
//! [`SessionLoop`] owns the transport and the input source. It turns bytes
//! into frames, feeds frames and typed lines to the [`TurnController`], and
//! writes back whatever the controller asks for. While the player is being
//! asked for input the loop keeps watching the connection, so a TURN_END or
//! GAME_OVER preempts the prompt instead of waiting behind it.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::{timeout, timeout_at, Instant};

use crate::{
    codec::FrameCodec,
    config::{ClientConfig, MAX_FRAME_LEN, MIN_POLL_INTERVAL, SHUTDOWN_GRACE},
    controller::{InputRequest, Notice, Output, TurnController},
    input::InputSource,
    protocol::{ClientFrame, ServerFrame},
    shutdown::ShutdownToken,
    transport::Transport,
    ui,
};

/// How a session finished without a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The server declared the game over; carries its summary.
    GameOver(String),
    /// The player surrendered or local input ran out.
    Quit,
    /// The shutdown token fired.
    Interrupted,
}

enum Wake {
    Chunk(anyhow::Result<usize>),
    Line(anyhow::Result<Option<String>>),
    Shutdown,
    Tick,
}

pub struct SessionLoop {
    transport: Box<dyn Transport>,
    input: Box<dyn InputSource>,
    shutdown: ShutdownToken,
    controller: TurnController,
    codec: FrameCodec,
    buf: Vec<u8>,
    queued: VecDeque<String>,
    multiplex_input: bool,
    poll_interval: Duration,
    login_timeout: Duration,
    quit_sent: bool,
    ended: Option<SessionEnd>,
}

impl SessionLoop {
    pub fn new(
        transport: Box<dyn Transport>,
        input: Box<dyn InputSource>,
        config: &ClientConfig,
        shutdown: ShutdownToken,
    ) -> Self {
        Self::with_controller(transport, input, config, shutdown, TurnController::new(config))
    }

    pub fn with_controller(
        transport: Box<dyn Transport>,
        input: Box<dyn InputSource>,
        config: &ClientConfig,
        shutdown: ShutdownToken,
        controller: TurnController,
    ) -> Self {
        Self {
            transport,
            input,
            shutdown,
            controller,
            codec: FrameCodec::new(),
            buf: vec![0; MAX_FRAME_LEN],
            queued: VecDeque::new(),
            multiplex_input: config.multiplex_input,
            // A zero tick would win every select round and spin.
            poll_interval: config.poll_interval.max(MIN_POLL_INTERVAL),
            login_timeout: config.login_timeout,
            quit_sent: false,
            ended: None,
        }
    }

    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    /// Send LOGIN and wait for the answer.
    ///
    /// The first frame back must be `LOGIN|OK`; anything else, or silence
    /// past the login timeout, fails the session. Frames that arrived in
    /// the same read as the answer are kept for [`run`](Self::run).
    ///
    /// An interrupt while waiting sends QUIT and closes the transport;
    /// `login` then returns `Ok` and the following `run` reports
    /// [`SessionEnd::Interrupted`].
    pub async fn login(&mut self) -> anyhow::Result<()> {
        let frame = self.controller.login_frame();
        self.send(&frame).await?;
        log::info!("login sent as {}", self.controller.session().player_name());

        let login_timeout = self.login_timeout;
        let deadline = Instant::now() + login_timeout;
        let answer = loop {
            if let Some(line) = self.queued.pop_front() {
                break line;
            }
            match timeout_at(deadline, self.wait_server()).await {
                Ok(Wake::Chunk(read)) => self.absorb(read?)?,
                Ok(_) => {
                    self.ended = Some(self.interrupt().await);
                    return Ok(());
                }
                Err(_) => {
                    return Err(anyhow::anyhow!(
                        "No login answer within {:?}",
                        login_timeout
                    ))
                }
            }
        };
        match ServerFrame::decode(&answer) {
            Ok(ServerFrame::LoginOk) => {
                let outputs = self.controller.handle_frame(ServerFrame::LoginOk);
                self.apply(outputs).await
            }
            Ok(ServerFrame::LoginRejected(reason)) => {
                Err(anyhow::anyhow!("Login rejected: {}", reason))
            }
            Ok(_) => Err(anyhow::anyhow!(
                "Expected LOGIN|OK, got unexpected frame: {}",
                answer
            )),
            Err(e) => Err(anyhow::anyhow!("Login failed: {}", e)),
        }
    }

    /// Drive the game until it ends.
    ///
    /// Transport failures (closed peer, oversized frame, failed send) are
    /// returned as errors; protocol oddities are reported and skipped.
    pub async fn run(&mut self) -> anyhow::Result<SessionEnd> {
        if let Some(end) = self.ended.take() {
            return Ok(end);
        }
        let mut prompted: Option<InputRequest> = None;
        loop {
            if self.controller.is_over() {
                return Ok(self.finish().await);
            }
            if self.shutdown.is_triggered() {
                return Ok(self.interrupt().await);
            }
            if let Some(line) = self.queued.pop_front() {
                self.dispatch(&line).await?;
                // Anything printed for the frame pushed the prompt off screen.
                prompted = None;
                continue;
            }

            let Some(request) = self.controller.input_request() else {
                prompted = None;
                match self.wait_server().await {
                    Wake::Chunk(read) => self.absorb(read?)?,
                    _ => continue,
                }
                continue;
            };

            if prompted.as_ref() != Some(&request) {
                ui::prompt(&request, self.controller.session());
                prompted = Some(request);
            }
            let wake = if self.multiplex_input {
                self.wait_any().await
            } else {
                self.wait_input().await
            };
            match wake {
                Wake::Chunk(read) => self.absorb(read?)?,
                Wake::Line(Ok(Some(line))) => {
                    match self.controller.handle_input(&line) {
                        Ok(outputs) => self.apply(outputs).await?,
                        Err(e) => {
                            log::debug!("rejected input {:?}: {}", line, e);
                            ui::print_input_error(&e);
                        }
                    }
                    prompted = None;
                }
                Wake::Line(Ok(None)) => {
                    log::info!("end of input, leaving the game");
                    let outputs = self.controller.surrender();
                    self.apply(outputs).await?;
                }
                Wake::Line(Err(e)) => return Err(e),
                Wake::Shutdown | Wake::Tick => {}
            }
        }
    }

    /// Wait for the server, the player or the shutdown token, whichever comes first.
    async fn wait_any(&mut self) -> Wake {
        tokio::select! {
            biased;
            read = self.transport.recv(&mut self.buf) => Wake::Chunk(read),
            _ = self.shutdown.triggered() => Wake::Shutdown,
            line = self.input.next_line() => Wake::Line(line),
            _ = tokio::time::sleep(self.poll_interval) => Wake::Tick,
        }
    }

    async fn wait_input(&mut self) -> Wake {
        tokio::select! {
            biased;
            _ = self.shutdown.triggered() => Wake::Shutdown,
            line = self.input.next_line() => Wake::Line(line),
        }
    }

    async fn wait_server(&mut self) -> Wake {
        tokio::select! {
            biased;
            read = self.transport.recv(&mut self.buf) => Wake::Chunk(read),
            _ = self.shutdown.triggered() => Wake::Shutdown,
        }
    }

    fn absorb(&mut self, n: usize) -> anyhow::Result<()> {
        let frames = self
            .codec
            .feed(&self.buf[..n])
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        self.queued.extend(frames);
        Ok(())
    }

    async fn dispatch(&mut self, line: &str) -> anyhow::Result<()> {
        log::debug!("<- {}", line);
        let outputs = match ServerFrame::decode(line) {
            Ok(frame) => self.controller.handle_frame(frame),
            Err(e) => self.controller.handle_frame_error(e),
        };
        self.apply(outputs).await
    }

    async fn apply(&mut self, outputs: Vec<Output>) -> anyhow::Result<()> {
        for output in outputs {
            match output {
                Output::Send(ClientFrame::Quit) => {
                    self.quit_sent = true;
                    if let Err(e) = self.send(&ClientFrame::Quit).await {
                        log::warn!("QUIT not delivered: {}", e);
                    }
                }
                Output::Send(frame) => self.send(&frame).await?,
                Output::Notify(notice) => self.notify(&notice),
            }
        }
        Ok(())
    }

    async fn send(&mut self, frame: &ClientFrame) -> anyhow::Result<()> {
        log::debug!("-> {}", frame);
        self.transport
            .send(&FrameCodec::encode(frame))
            .await
            .map_err(|e| anyhow::anyhow!("Sending {} failed: {}", frame, e))
    }

    fn notify(&self, notice: &Notice) {
        if notice.is_protocol_problem() {
            log::warn!("{}", notice);
        } else {
            log::info!("{}", notice);
        }
        if *notice == Notice::PlacementComplete {
            log::info!("own board:\n{}", self.controller.session().own_board());
        }
        ui::print_notice(notice);
    }

    async fn finish(&mut self) -> SessionEnd {
        self.close().await;
        if self.quit_sent {
            log::info!("left the game");
            return SessionEnd::Quit;
        }
        let summary = self
            .controller
            .session()
            .summary()
            .map(String::from)
            .unwrap_or_default();
        log::info!("game over: {}", summary);
        SessionEnd::GameOver(summary)
    }

    async fn interrupt(&mut self) -> SessionEnd {
        log::info!("interrupted, sending QUIT");
        let bytes = FrameCodec::encode(&ClientFrame::Quit);
        match timeout(SHUTDOWN_GRACE, self.transport.send(&bytes)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::warn!("QUIT not delivered: {}", e),
            Err(_) => log::warn!("QUIT not delivered within {:?}", SHUTDOWN_GRACE),
        }
        self.close().await;
        SessionEnd::Interrupted
    }

    async fn close(&mut self) {
        match timeout(SHUTDOWN_GRACE, self.transport.close()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::debug!("close failed: {}", e),
            Err(_) => log::debug!("close timed out"),
        }
    }
}
