//! Line-oriented output formatting: plain values on stdout, one per line,
//! stable enough to script against.

use denonavr_core::{AttributeSnapshot, DeviceDescriptor};

/// One discovery line: host padded to a fixed column, then the friendly
/// name with model and serial in parentheses.
pub fn receiver_line(receiver: &DeviceDescriptor) -> String {
    format!(
        "{:<15} {} ({} {})",
        receiver.host, receiver.friendly_name, receiver.model_name, receiver.serial_number
    )
}

/// The no-subcommand status summary.
pub fn status_line(snapshot: &AttributeSnapshot) -> String {
    format!(
        "Power: {:<7}  Volume: {:>5.1} dB {} Input: {}",
        snapshot.power.to_string(),
        snapshot.volume,
        if snapshot.muted { "(muted)" } else { "       " },
        snapshot.input_func
    )
}

#[cfg(test)]
mod tests {
    use denonavr_core::{DeviceDescriptor, Power};
    use pretty_assertions::assert_eq;

    use super::*;

    fn snapshot() -> AttributeSnapshot {
        AttributeSnapshot {
            power: Power::On,
            muted: false,
            volume: -45.5,
            input_func: "Game".into(),
            ..AttributeSnapshot::default()
        }
    }

    #[test]
    fn receiver_line_pads_the_host_column() {
        let receiver = DeviceDescriptor {
            host: "mocked-host".into(),
            manufacturer: "Mocker".into(),
            model_name: "Mocked AVR".into(),
            serial_number: "M0CK1234567890".into(),
            friendly_name: "My Mocked AVR".into(),
        };
        assert_eq!(
            receiver_line(&receiver),
            "mocked-host     My Mocked AVR (Mocked AVR M0CK1234567890)"
        );
    }

    #[test]
    fn long_hosts_are_not_truncated() {
        let receiver = DeviceDescriptor {
            host: "a-very-long-receiver-host.local".into(),
            manufacturer: "Mocker".into(),
            model_name: "AVR".into(),
            serial_number: "1".into(),
            friendly_name: "Den".into(),
        };
        assert_eq!(
            receiver_line(&receiver),
            "a-very-long-receiver-host.local Den (AVR 1)"
        );
    }

    #[test]
    fn status_line_format() {
        assert_eq!(
            status_line(&snapshot()),
            "Power: ON       Volume: -45.5 dB         Input: Game"
        );
    }

    #[test]
    fn status_line_flags_mute() {
        let mut snap = snapshot();
        snap.muted = true;
        snap.volume = -40.0;
        assert_eq!(
            status_line(&snap),
            "Power: ON       Volume: -40.0 dB (muted) Input: Game"
        );
    }
}
