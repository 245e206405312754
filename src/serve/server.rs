use super::protocol::{
    NewlineArguments, RenderArguments, ScrollArguments, ServeMessage, ServeMessageContent,
    SetInputArguments, SetOptionsArguments,
};
use crate::controller::{Clipboard, KeyValueStore, Pane, UiController};
use crate::render::{render_with, RenderOptions};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

const CONTENT_LENGTH: &str = "Content-Length:";

/// Larger declared frames are rejected before anything is allocated.
const MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

/// One frontend connection: framed JSON on `reader`/`writer`, driving a
/// single controller.
pub struct ServeServer<R, W, S, C> {
    seq: u64,
    reader: R,
    writer: W,
    ui: UiController<S, C>,
}

impl<R, W, S, C> ServeServer<R, W, S, C>
where
    R: BufRead,
    W: Write,
    S: KeyValueStore,
    C: Clipboard,
{
    pub fn new(reader: R, writer: W, ui: UiController<S, C>) -> Self {
        Self {
            seq: 0,
            reader,
            writer,
            ui,
        }
    }

    pub fn ui(&self) -> &UiController<S, C> {
        &self.ui
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    pub fn send_response(
        &mut self,
        request_seq: u64,
        command: String,
        success: bool,
        message: Option<String>,
        body: Option<Value>,
    ) -> io::Result<()> {
        let msg = ServeMessage {
            seq: self.next_seq(),
            msg_type: "response".to_string(),
            content: ServeMessageContent::Response {
                request_seq,
                success,
                command,
                message,
                body,
            },
        };
        self.send_message(&msg)
    }

    pub fn send_event(&mut self, event: &str, body: Option<Value>) -> io::Result<()> {
        let msg = ServeMessage {
            seq: self.next_seq(),
            msg_type: "event".to_string(),
            content: ServeMessageContent::Event {
                event: event.to_string(),
                body,
            },
        };
        self.send_message(&msg)
    }

    fn send_message(&mut self, msg: &ServeMessage) -> io::Result<()> {
        let json = serde_json::to_string(msg).map_err(io::Error::other)?;
        write!(self.writer, "{} {}\r\n\r\n{}", CONTENT_LENGTH, json.len(), json)?;
        self.writer.flush()?;
        debug!(seq = msg.seq, bytes = json.len(), "sent message");
        Ok(())
    }

    /// Read one framed message. `Ok(None)` means the peer closed the stream;
    /// a frame that cannot be used is an `InvalidData` error. The header scan
    /// looks for `Content-Length:` anywhere in a line, so a skipped body that
    /// runs into the next header does not swallow the following frame.
    pub fn read_message(&mut self) -> io::Result<Option<ServeMessage>> {
        let mut content_length = None;
        let mut saw_header = false;

        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                if saw_header {
                    break;
                }
                continue;
            }
            saw_header = true;
            if let Some(pos) = line.find(CONTENT_LENGTH) {
                let rest = &line[pos + CONTENT_LENGTH.len()..];
                content_length = rest.trim().parse::<usize>().ok();
            }
        }

        let content_length = match content_length {
            Some(len) if len > 0 && len <= MAX_FRAME_BYTES => len,
            Some(len) if len > MAX_FRAME_BYTES => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("frame of {len} bytes exceeds {MAX_FRAME_BYTES}"),
                ));
            }
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "frame without a usable Content-Length",
                ));
            }
        };

        let mut buffer = vec![0u8; content_length];
        self.reader.read_exact(&mut buffer)?;
        serde_json::from_slice(&buffer)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Serve requests until `disconnect` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let msg = match self.read_message() {
                Ok(Some(msg)) => msg,
                Ok(None) => break,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    warn!("stream ended inside a frame");
                    break;
                }
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    warn!("dropping malformed frame: {e}");
                    continue;
                }
                Err(e) => return Err(e),
            };
            debug!(seq = msg.seq, "received {:?}", msg.content);

            if msg.msg_type != "request" {
                warn!(kind = %msg.msg_type, "ignoring non-request message #{}", msg.seq);
                continue;
            }
            match msg.content {
                ServeMessageContent::Request { command, arguments } => {
                    if !self.dispatch(msg.seq, command, arguments)? {
                        break;
                    }
                }
                _ => warn!("ignoring request #{} without a command", msg.seq),
            }
        }
        Ok(())
    }

    /// Returns false once the session should end.
    fn dispatch(&mut self, seq: u64, command: String, args: Option<Value>) -> io::Result<bool> {
        match command.as_str() {
            "initialize" => self.handle_initialize(seq, command)?,
            "load" => {
                self.ui.load();
                self.respond_with_state(seq, command)?;
            }
            "setInput" => self.handle_set_input(seq, command, args)?,
            "setOptions" => self.handle_set_options(seq, command, args)?,
            "newline" => self.handle_newline(seq, command, args)?,
            "copy" => self.handle_copy(seq, command)?,
            "reset" => {
                self.ui.reset();
                self.respond_with_state(seq, command)?;
            }
            "scroll" => self.handle_scroll(seq, command, args)?,
            "render" => self.handle_render(seq, command, args)?,
            "disconnect" => {
                self.send_response(seq, command, true, None, None)?;
                return Ok(false);
            }
            _ => {
                warn!("unhandled command: {command}");
                let message = format!("unknown command: {command}");
                self.send_response(seq, command, false, Some(message), None)?;
            }
        }
        Ok(true)
    }

    fn parse_args<T: DeserializeOwned>(
        &mut self,
        seq: u64,
        command: &str,
        args: Option<Value>,
    ) -> io::Result<Option<T>> {
        match serde_json::from_value(args.unwrap_or(Value::Null)) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                let message = format!("invalid arguments: {e}");
                self.send_response(seq, command.to_string(), false, Some(message), None)?;
                Ok(None)
            }
        }
    }

    fn send_rendered(&mut self) -> io::Result<()> {
        let status = self.ui.take_status();
        let body = json!({ "output": self.ui.output(), "status": status });
        self.send_event("rendered", Some(body))
    }

    fn respond_with_state(&mut self, seq: u64, command: String) -> io::Result<()> {
        let body = json!({
            "input": self.ui.input(),
            "appendSlash": self.ui.append_slash(),
        });
        self.send_response(seq, command, true, None, Some(body))?;
        self.send_rendered()
    }

    pub fn handle_initialize(&mut self, seq: u64, command: String) -> io::Result<()> {
        let body = json!({
            "supportsNewline": true,
            "supportsScrollSync": true,
            "supportsCopy": true,
            "supportsRender": true,
        });
        self.send_response(seq, command, true, None, Some(body))?;
        self.send_event("initialized", None)
    }

    pub fn handle_set_input(
        &mut self,
        seq: u64,
        command: String,
        args: Option<Value>,
    ) -> io::Result<()> {
        let Some(args) = self.parse_args::<SetInputArguments>(seq, &command, args)? else {
            return Ok(());
        };
        self.ui.set_input(args.text);
        self.send_response(seq, command, true, None, None)?;
        self.send_rendered()
    }

    pub fn handle_set_options(
        &mut self,
        seq: u64,
        command: String,
        args: Option<Value>,
    ) -> io::Result<()> {
        let Some(args) = self.parse_args::<SetOptionsArguments>(seq, &command, args)? else {
            return Ok(());
        };
        self.ui.set_append_slash(args.append_slash);
        self.respond_with_state(seq, command)
    }

    pub fn handle_newline(
        &mut self,
        seq: u64,
        command: String,
        args: Option<Value>,
    ) -> io::Result<()> {
        let Some(args) = self.parse_args::<NewlineArguments>(seq, &command, args)? else {
            return Ok(());
        };
        if let Some(text) = args.text {
            self.ui.set_input(text);
        }
        let cursor = self.ui.insert_newline(args.cursor);
        let body = json!({ "text": self.ui.input(), "cursor": cursor });
        self.send_response(seq, command, true, None, Some(body))?;
        self.send_rendered()
    }

    pub fn handle_copy(&mut self, seq: u64, command: String) -> io::Result<()> {
        match self.ui.copy() {
            Ok(()) => self.send_response(seq, command, true, None, None)?,
            Err(e) => self.send_response(seq, command, false, Some(e.to_string()), None)?,
        }
        self.send_rendered()
    }

    pub fn handle_scroll(
        &mut self,
        seq: u64,
        command: String,
        args: Option<Value>,
    ) -> io::Result<()> {
        let Some(args) = self.parse_args::<ScrollArguments>(seq, &command, args)? else {
            return Ok(());
        };
        if let Some(metrics) = args.input {
            self.ui.set_metrics(Pane::Input, metrics);
        }
        if let Some(metrics) = args.output {
            self.ui.set_metrics(Pane::Output, metrics);
        }

        let body = match self.ui.scroll(args.pane, args.top) {
            Some(top) => json!({ "pane": args.pane.other(), "top": top }),
            None => json!({ "pane": args.pane.other(), "top": null }),
        };
        self.send_response(seq, command, true, None, Some(body))
    }

    pub fn handle_render(
        &mut self,
        seq: u64,
        command: String,
        args: Option<Value>,
    ) -> io::Result<()> {
        let Some(args) = self.parse_args::<RenderArguments>(seq, &command, args)? else {
            return Ok(());
        };
        let options = RenderOptions {
            append_slash: args.append_slash,
            literal_root: args.literal_root,
        };
        let body = json!({ "output": render_with(&args.text, &options) });
        self.send_response(seq, command, true, None, Some(body))
    }
}
