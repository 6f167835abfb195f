//! Interactive terminal session.
//!
//! Each line read from the input is either a `:` command or new input
//! text. Input text goes through the debouncer exactly as keystrokes
//! would, so typing several lines in quick succession searches only the
//! last one. The loop multiplexes four sources with `select!`: input
//! lines, debounced queries, finished searches, and status changes.

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use zekat_search::ResearchSource;

use crate::config::UiConfig;
use crate::controller::{ViewController, ViewState};
use crate::debounce;
use crate::error::{AppError, Result};
use crate::render;
use crate::status::{ApiStatus, OfflineNotice};

const HELP: &str = "\
Komutlar:
  <metin>      arama metnini değiştir (otomatik arama)
  :search      mevcut metni hemen ara ve geçmişe ekle
  :retry       son aramayı tekrarla
  :clear       aramayı temizle
  :history     son aramaları listele
  :use N       geçmişteki N numaralı aramayı tekrarla
  :forget      arama geçmişini sil
  :status      servis durumunu göster
  :help        bu yardımı göster
  :quit        çık
";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// New input text, debounced before searching.
    Input(String),
    /// Submit the current input, or the given text, immediately.
    Search(Option<String>),
    Retry,
    Clear,
    History,
    Forget,
    /// Submit a history entry (zero-based).
    Use(usize),
    Status,
    Help,
    Quit,
    /// A `:` command that was not understood.
    Unknown(String),
}

/// Parse a raw input line.
pub fn parse_line(line: &str) -> SessionCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return SessionCommand::Input(line.to_owned());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    match (name, arg) {
        ("search" | "s", "") => SessionCommand::Search(None),
        ("search" | "s", text) => SessionCommand::Search(Some(text.to_owned())),
        ("retry" | "r", "") => SessionCommand::Retry,
        ("clear" | "c", "") => SessionCommand::Clear,
        ("history" | "h", "") => SessionCommand::History,
        ("forget", "") => SessionCommand::Forget,
        ("use" | "u", n) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => SessionCommand::Use(n - 1),
            _ => SessionCommand::Unknown(line.trim().to_owned()),
        },
        ("status", "") => SessionCommand::Status,
        ("help" | "?", "") => SessionCommand::Help,
        ("quit" | "q" | "exit", "") => SessionCommand::Quit,
        _ => SessionCommand::Unknown(line.trim().to_owned()),
    }
}

/// Interactive search session over a line-oriented input and an output.
pub struct Session<S> {
    controller: ViewController<S>,
    status: watch::Receiver<ApiStatus>,
    notice: OfflineNotice,
    debounce: Duration,
}

impl<S> Session<S>
where
    S: ResearchSource + 'static,
{
    pub fn new(
        controller: ViewController<S>,
        status: watch::Receiver<ApiStatus>,
        ui: &UiConfig,
    ) -> Self {
        Self {
            controller,
            status,
            notice: OfflineNotice::new(ui.offline_notice()),
            debounce: ui.debounce(),
        }
    }

    pub fn controller(&self) -> &ViewController<S> {
        &self.controller
    }

    /// Run until `:quit`, or until the input ends and outstanding work has
    /// been rendered.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if reading input or writing output fails.
    pub async fn run<R, W>(&mut self, input: R, mut out: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (debounce_tx, mut debounced) = debounce::spawn::<String>(self.debounce);
        let mut debounce_tx = Some(debounce_tx);
        let mut lines = input.lines();
        let mut input_open = true;
        let mut debounce_open = true;
        let mut status_open = true;

        write_out(&mut out, &render::render_welcome()).await?;
        write_out(&mut out, "Yardım için :help yazın.\n").await?;

        loop {
            if !input_open && !debounce_open && !self.controller.state().is_loading() {
                break;
            }

            tokio::select! {
                line = lines.next_line(), if input_open => {
                    match line? {
                        Some(line) => {
                            let command = parse_line(&line);
                            if command == SessionCommand::Quit {
                                info!("session ended by user");
                                break;
                            }
                            self.handle_command(command, debounce_tx.as_ref(), &mut out).await?;
                        }
                        None => {
                            debug!("input closed");
                            input_open = false;
                            debounce_tx = None;
                        }
                    }
                }
                query = debounced.recv(), if debounce_open => {
                    match query {
                        Some(query) => self.handle_debounced(&query, &mut out).await?,
                        None => debounce_open = false,
                    }
                }
                completion = self.controller.next_completion() => {
                    if let Some(completion) = completion {
                        if self.controller.apply(completion) {
                            self.render_view(&mut out).await?;
                        }
                    }
                }
                changed = self.status.changed(), if status_open => {
                    if changed.is_err() {
                        status_open = false;
                    } else {
                        self.handle_status(&mut out).await?;
                    }
                }
            }
        }

        out.flush().await?;
        Ok(())
    }

    async fn handle_command<W>(
        &mut self,
        command: SessionCommand,
        debounce_tx: Option<&tokio::sync::mpsc::UnboundedSender<String>>,
        out: &mut W,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let input_before = self.controller.input().to_owned();
        let typed = matches!(command, SessionCommand::Input(_));

        match command {
            SessionCommand::Input(text) => {
                if let Some(hint) = render::input_hint(&text, self.controller.min_query_chars()) {
                    write_out(out, &format!("{hint}\n")).await?;
                }
                self.controller.set_input(text.clone());
                feed_debouncer(debounce_tx, text)?;
            }
            SessionCommand::Search(text) => {
                let query = text.unwrap_or_else(|| self.controller.input().to_owned());
                if self.controller.submit(&query) {
                    write_out(out, &render::render_loading()).await?;
                } else if let Some(hint) =
                    render::input_hint(&query, self.controller.min_query_chars())
                {
                    write_out(out, &format!("{hint}\n")).await?;
                }
            }
            SessionCommand::Retry => {
                if self.controller.retry() {
                    write_out(out, &render::render_loading()).await?;
                }
            }
            SessionCommand::Clear => {
                self.controller.clear();
                write_out(out, &render::render_welcome()).await?;
            }
            SessionCommand::History => {
                write_out(out, &render::render_history(self.controller.history())).await?;
            }
            SessionCommand::Forget => match self.controller.history_mut().clear() {
                Ok(()) => write_out(out, "Arama geçmişi silindi.\n").await?,
                Err(err) => {
                    warn!(error = %err, "cannot clear search history");
                    write_out(out, &format!("Geçmiş silinemedi: {err}\n")).await?;
                }
            },
            SessionCommand::Use(index) => {
                if self.controller.submit_history(index) {
                    write_out(out, &render::render_loading()).await?;
                } else {
                    write_out(out, "Geçmişte böyle bir arama yok.\n").await?;
                }
            }
            SessionCommand::Status => {
                let status = *self.status.borrow();
                write_out(out, &format!("Durum: {}\n", render::status_badge(status))).await?;
            }
            SessionCommand::Help => write_out(out, HELP).await?,
            SessionCommand::Unknown(raw) => {
                write_out(out, &format!("Bilinmeyen komut: {raw} (:help)\n")).await?;
            }
            SessionCommand::Quit => {}
        }

        // Commands that replace the input restart the debounce window, so a
        // value typed just before them is never searched.
        if !typed && self.controller.input() != input_before {
            feed_debouncer(debounce_tx, self.controller.input().to_owned())?;
        }
        Ok(())
    }

    async fn handle_debounced<W>(&mut self, query: &str, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let was_idle = *self.controller.state() == ViewState::Idle;
        if self.controller.on_debounced_query(query) {
            write_out(out, &render::render_loading()).await?;
        } else if query.trim().is_empty() && !was_idle {
            write_out(out, &render::render_welcome()).await?;
        }
        Ok(())
    }

    async fn handle_status<W>(&mut self, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let status = *self.status.borrow_and_update();
        let has_query = !self.controller.input().trim().is_empty();
        let now = Instant::now();
        self.notice.observe(status, has_query, now);

        if has_query {
            if let Some(notice) = render::status_notice(status, self.notice.is_active(now)) {
                write_out(out, &format!("{notice}\n")).await?;
            }
        }
        Ok(())
    }

    async fn render_view<W>(&mut self, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let status = *self.status.borrow();
        let text = render::render_view(
            self.controller.state(),
            self.controller.input().trim(),
            status,
            self.notice.is_active(Instant::now()),
        );
        write_out(out, &text).await
    }
}

fn feed_debouncer(
    debounce_tx: Option<&tokio::sync::mpsc::UnboundedSender<String>>,
    text: String,
) -> Result<()> {
    match debounce_tx {
        Some(tx) => tx
            .send(text)
            .map_err(|_| AppError::Channel("debouncer stopped".into())),
        None => Ok(()),
    }
}

async fn write_out<W>(out: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}
