//! Synthetic LINE export generator for stress testing linepack.
//!
//! Usage: cargo run --bin gen_test --features gen-test -- [messages] [output]
//! Example: cargo run --bin gen_test --features gen-test -- 100000 heavy_line.txt

use rand::Rng;
use rand::seq::SliceRandom;
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

const WEEKDAYS: &[&str] = &["日", "一", "二", "三", "四", "五", "六"];

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "Alice Chen",
    "陳大文",
    "王小明 Wang",
    "村上",
    "Иван",
    "🔥FireUser🔥",
    "Mr. Lee Jr",
];

const EMOJIS: &[&str] = &[
    "😀", "😂", "😍", "🤔", "🙄", "😱", "🤯", "💀", "🔥", "👍", "❤️", "🏳️‍🌈", "👨‍👩‍👧‍👦",
];

const PLACEHOLDERS: &[&str] = &["貼圖", "圖片", "影片", "聯絡資訊", "已收回訊息"];

/// How the sender is separated from the text on a header line.
#[derive(Clone, Copy)]
enum Separator {
    Tab,
    DoubleSpace,
    Space,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);

    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_line.txt");

    println!("🧪 LINE Export Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!();

    generate_line(count, output);
}

fn generate_line(count: usize, output: &str) {
    let file = File::create(output).expect("Failed to create output file");
    let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer

    let mut rng = rand::thread_rng();
    let start = std::time::Instant::now();
    let mut bytes_written: usize = 0;

    // Some exports carry a BOM and a title block
    let preamble = "\u{feff}[LINE] 測試群組的聊天記錄\n儲存日期：2024/06/01 12:00\n\n";
    writer.write_all(preamble.as_bytes()).unwrap();
    bytes_written += preamble.len();

    for i in 0..count {
        if i % 200 == 0 {
            let day = i / 200;
            let divider = format!(
                "\n2024/{:02}/{:02}（{}）\n",
                (day / 28) % 12 + 1,
                day % 28 + 1,
                WEEKDAYS[day % WEEKDAYS.len()]
            );
            writer.write_all(divider.as_bytes()).unwrap();
            bytes_written += divider.len();
        }

        let time = generate_time(&mut rng, i);
        let line = if i % 97 == 0 {
            format!("{} {}\n", time, generate_event(&mut rng))
        } else {
            let sender = SENDERS.choose(&mut rng).unwrap();
            let separator = match rng.gen_range(0..10) {
                0..=5 => Separator::Tab,
                6..=7 => Separator::DoubleSpace,
                _ => Separator::Space,
            };
            format!(
                "{} {}\n",
                time,
                join_header(sender, separator, &generate_message(&mut rng, i))
            )
        };

        bytes_written += line.len();
        writer.write_all(line.as_bytes()).unwrap();

        // Occasionally insert stray lines to test robustness
        if i % 1000 == 500 {
            let stray = generate_stray_line(&mut rng);
            writer.write_all(stray.as_bytes()).unwrap();
            bytes_written += stray.len();
        }

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            let mps = (i + 1) as f64 / elapsed;
            let mb = bytes_written as f64 / 1_000_000.0;
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                mb,
                mps
            );
        }
    }

    writer.flush().unwrap();

    let elapsed = start.elapsed();
    let mb = bytes_written as f64 / 1_000_000.0;

    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", mb);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "   Speed: {:.0} msg/s",
        count as f64 / elapsed.as_secs_f64()
    );
}

fn generate_time(rng: &mut impl Rng, index: usize) -> String {
    let minute = index % 60;
    if rng.gen_bool(0.2) {
        let marker = if rng.gen_bool(0.5) { "上午" } else { "下午" };
        format!("{} {}:{:02}", marker, rng.gen_range(1..=12), minute)
    } else {
        format!("{:02}:{:02}", rng.gen_range(0..24), minute)
    }
}

fn join_header(sender: &str, separator: Separator, text: &str) -> String {
    match separator {
        Separator::Tab => format!("{sender}\t{text}"),
        Separator::DoubleSpace => format!("{sender}  {text}"),
        Separator::Space => format!("{sender} {text}"),
    }
}

fn generate_event(rng: &mut impl Rng) -> String {
    let a = SENDERS.choose(rng).unwrap();
    let b = SENDERS.choose(rng).unwrap();
    match rng.gen_range(0..4) {
        0 => format!("{a}已加入群組。"),
        1 => format!("{a}已退出群組。"),
        2 => format!("{a}邀請{b}加入群組。"),
        _ => format!("{a}已將{b}退出群組。"),
    }
}

fn generate_message(rng: &mut impl Rng, index: usize) -> String {
    match index % 20 {
        // Normal messages
        0..=7 => format!("Normal message #{} with some text", index),

        // Multi-line message, continuation lines follow the header
        8 => format!("First line #{}\nsecond line\n  indented third", index),
        9 => {
            let lines: Vec<String> = (0..rng.gen_range(8..15))
                .map(|n| format!("long paste line {n}"))
                .collect();
            lines.join("\n")
        }

        // Viewer placeholders
        10 | 11 => PLACEHOLDERS.choose(rng).unwrap().to_string(),

        // Emoji spam
        12 => {
            let emojis: String = (0..30)
                .map(|_| *EMOJIS.choose(rng).unwrap())
                .collect::<Vec<_>>()
                .join("");
            format!("{} #{}", emojis, index)
        }

        // Separators inside the text
        13 => format!("tabs\tinside\ttext #{}", index),
        14 => format!("wide  spaces  everywhere #{}", index),

        // Unicode
        15 => format!("中文訊息：今天天氣很好 #{}", index),
        16 => format!("日本語: こんにちは #{}", index),
        17 => format!("Mixed: Hello Привет 你好 🌍 #{}", index),

        // Line that looks like a header once wrapped
        18 => format!("meeting moved\n12:30 works for me #{}", index),

        // Empty text
        _ => String::new(),
    }
}

fn generate_stray_line(rng: &mut impl Rng) -> String {
    match rng.gen_range(0..5) {
        0 => "This line has no timestamp at all\n".to_string(),
        1 => "2024/13/45 is not a real date but looks like one\n".to_string(),
        2 => "-------------------------------------------\n".to_string(),
        3 => "   \n".to_string(), // Whitespace-only line
        _ => "☠️💀👻 Random emoji line 👻💀☠️\n".to_string(),
    }
}
