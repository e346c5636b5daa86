//! MIDI input device lifecycle: port enumeration, connection, and a
//! polled stream of note events.

use midir::{MidiInput, MidiInputConnection};
use std::sync::mpsc::{self, Receiver, Sender};

use etude_types::PitchId;

/// A note event from the connected device. Timestamp is in microseconds
/// from a driver-specific epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub timestamp_us: u64,
    pub kind: NoteEventKind,
}

/// The trainer only listens for key presses and releases; every other
/// message type on the wire is ignored. Channel is ignored too — a
/// practice keyboard may transmit on any channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEventKind {
    On { note: PitchId, velocity: u8 },
    Off { note: PitchId },
}

/// Information about an available MIDI input port.
#[derive(Debug, Clone)]
pub struct MidiPortInfo {
    pub index: usize,
    pub name: String,
}

/// MIDI input manager. Connecting tears down any prior connection first,
/// so the subscription is scoped exactly to the active device and
/// listeners never accumulate across device changes.
pub struct MidiInputManager {
    midi_in: Option<MidiInput>,
    connection: Option<MidiInputConnection<()>>,
    event_receiver: Option<Receiver<NoteEvent>>,
    event_sender: Option<Sender<NoteEvent>>,
    connected_port_name: Option<String>,
    available_ports: Vec<MidiPortInfo>,
}

impl MidiInputManager {
    pub fn new() -> Self {
        let midi_in = MidiInput::new("etude").ok();
        Self {
            midi_in,
            connection: None,
            event_receiver: None,
            event_sender: None,
            connected_port_name: None,
            available_ports: Vec::new(),
        }
    }

    /// True if the MIDI backend came up at all.
    pub fn is_available(&self) -> bool {
        self.midi_in.is_some() || self.connection.is_some()
    }

    /// Refresh the list of available input ports.
    pub fn refresh_ports(&mut self) {
        self.available_ports.clear();

        if let Some(ref midi_in) = self.midi_in {
            let ports = midi_in.ports();
            for (index, port) in ports.iter().enumerate() {
                if let Ok(name) = midi_in.port_name(port) {
                    self.available_ports.push(MidiPortInfo { index, name });
                }
            }
        }
    }

    pub fn list_ports(&self) -> &[MidiPortInfo] {
        &self.available_ports
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn connected_port_name(&self) -> Option<&str> {
        self.connected_port_name.as_deref()
    }

    /// Connect to an input port by index. Any existing connection is torn
    /// down first.
    pub fn connect(&mut self, port_index: usize) -> Result<(), String> {
        self.disconnect();

        // MidiInput is consumed by connect(); recreate a fresh one.
        let midi_in = MidiInput::new("etude").map_err(|e| e.to_string())?;
        let ports = midi_in.ports();

        if port_index >= ports.len() {
            return Err(format!("Invalid port index: {}", port_index));
        }

        let port = &ports[port_index];
        let port_name = midi_in
            .port_name(port)
            .unwrap_or_else(|_| "Unknown".to_string());

        let (tx, rx) = mpsc::channel();
        self.event_sender = Some(tx.clone());
        self.event_receiver = Some(rx);

        let connection = midi_in
            .connect(
                port,
                "etude-input",
                move |timestamp, message, _| {
                    if let Some(kind) = parse_note_message(message) {
                        let _ = tx.send(NoteEvent {
                            timestamp_us: timestamp,
                            kind,
                        });
                    }
                },
                (),
            )
            .map_err(|e| e.to_string())?;

        self.connection = Some(connection);
        self.connected_port_name = Some(port_name);

        // Recreate MidiInput for future port listing.
        self.midi_in = MidiInput::new("etude").ok();

        Ok(())
    }

    pub fn disconnect(&mut self) {
        if let Some(conn) = self.connection.take() {
            conn.close();
        }
        self.event_receiver = None;
        self.event_sender = None;
        self.connected_port_name = None;
    }

    /// Drain pending note events (non-blocking). Events come out strictly
    /// in arrival order.
    pub fn poll_events(&self) -> Vec<NoteEvent> {
        let mut events = Vec::new();
        if let Some(ref rx) = self.event_receiver {
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
        }
        events
    }
}

impl Default for MidiInputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MidiInputManager {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Parse a raw MIDI message into a note event, any channel.
fn parse_note_message(data: &[u8]) -> Option<NoteEventKind> {
    if data.len() < 3 {
        return None;
    }

    match data[0] & 0xF0 {
        0x80 => Some(NoteEventKind::Off {
            note: PitchId::new(data[1]),
        }),
        0x90 => {
            // Note On with velocity 0 is a Note Off.
            if data[2] == 0 {
                Some(NoteEventKind::Off {
                    note: PitchId::new(data[1]),
                })
            } else {
                Some(NoteEventKind::On {
                    note: PitchId::new(data[1]),
                    velocity: data[2],
                })
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_note_on() {
        let event = parse_note_message(&[0x90, 60, 100]).unwrap();
        assert_eq!(
            event,
            NoteEventKind::On {
                note: PitchId::new(60),
                velocity: 100
            }
        );
    }

    #[test]
    fn parse_note_on_any_channel() {
        for channel in 0..16u8 {
            let event = parse_note_message(&[0x90 | channel, 72, 64]).unwrap();
            assert!(matches!(event, NoteEventKind::On { .. }));
        }
    }

    #[test]
    fn parse_note_off() {
        let event = parse_note_message(&[0x80, 60, 0]).unwrap();
        assert_eq!(
            event,
            NoteEventKind::Off {
                note: PitchId::new(60)
            }
        );
    }

    #[test]
    fn velocity_zero_is_note_off() {
        let event = parse_note_message(&[0x90, 60, 0]).unwrap();
        assert!(matches!(event, NoteEventKind::Off { .. }));
    }

    #[test]
    fn other_messages_are_ignored() {
        assert!(parse_note_message(&[0xB0, 1, 64]).is_none()); // CC
        assert!(parse_note_message(&[0xE0, 0x00, 0x40]).is_none()); // pitch bend
        assert!(parse_note_message(&[0xA0, 60, 40]).is_none()); // aftertouch
    }

    #[test]
    fn short_and_empty_messages_are_ignored() {
        assert!(parse_note_message(&[]).is_none());
        assert!(parse_note_message(&[0x90]).is_none());
        assert!(parse_note_message(&[0x90, 60]).is_none());
    }
}
