//! Example of driving a multiplexed 4-digit display from an RP2040 board like the Pi Pico.
//!
//! Counts up in tenths of a second.  A button on GPIO 13 toggles
//! between the counter and an `On`/`OFF` indicator.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_time::Instant;
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // GPIO 0-6 drive segments A-G, GPIO 7 the decimal point and GPIO 8-11 the digit enables, which
    // is exactly the default pin assignment
    let mut display = fourseg::FourSegDisplay::builder()
        .with_embassy_rp_pins([
            p.PIN_0.degrade(),
            p.PIN_1.degrade(),
            p.PIN_2.degrade(),
            p.PIN_3.degrade(),
            p.PIN_4.degrade(),
            p.PIN_5.degrade(),
            p.PIN_6.degrade(),
            p.PIN_7.degrade(),
            p.PIN_8.degrade(),
            p.PIN_9.degrade(),
            p.PIN_10.degrade(),
            p.PIN_11.degrade(),
        ])
        .with_embassy_timer()
        .build()
        .unwrap();

    let button = Input::new(p.PIN_13, Pull::Down);

    debug!("Counting!  Press the button to switch to the state display");

    let start = Instant::now();
    let mut show_state = false;
    let mut was_pressed = false;
    let mut text = [0u8; 5];

    loop {
        let pressed = button.is_high();
        if pressed && !was_pressed {
            show_state = !show_state;
            info!("showing state: {}", show_state);
        }
        was_pressed = pressed;

        // Nothing refreshes the display for us; each pass through the loop draws every digit once
        if show_state {
            let on = start.elapsed().as_secs() % 2 == 0;
            display.render_state(on).await.unwrap();
        } else {
            let tenths = start.elapsed().as_millis() / 100;
            display
                .render_value(format_tenths(tenths % 10_000, &mut text))
                .await
                .unwrap();
        }
    }
}

/// Render `tenths` as `"123.4"` into `buf`, without leading zeros except the one before the point
fn format_tenths(mut tenths: u64, buf: &mut [u8; 5]) -> &str {
    let mut digits = [0u8; 4];
    let mut count = 0;

    while count < digits.len() && (tenths > 0 || count < 2) {
        digits[count] = b'0' + (tenths % 10) as u8;
        tenths /= 10;
        count += 1;
    }

    let mut len = 0;
    for (i, digit) in digits[..count].iter().rev().enumerate() {
        if i == count - 1 {
            buf[len] = b'.';
            len += 1;
        }
        buf[len] = *digit;
        len += 1;
    }

    // Only ASCII digits and '.' were written
    core::str::from_utf8(&buf[..len]).unwrap_or("")
}
