use anyhow::{Result, ensure};
use flatstore::FlatStore;
use log::debug;
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout};

/// Name every scenario writes to, deleted once the run is over.
pub const BLOB_NAME: &str = "data";

const SEPARATOR: &str = "//-------------------------------------------------//";

type ScenarioFn = fn(&FlatStore) -> Result<()>;

/// Round trips exercised by the demo, in order.
pub const SCENARIOS: &[(&str, ScenarioFn)] = &[
    ("integer", integer),
    ("float", float),
    ("char", character),
    ("string", string),
    ("array", array),
    ("struct", plain_struct),
    ("heap buffer", heap_buffer),
    ("struct array", struct_array),
    ("nested struct", nested_struct),
    ("vec contents", vec_contents),
];

/// Runs every scenario against `store`, stopping at the first failure.
pub fn run_all(store: &FlatStore) -> Result<usize> {
    for (name, scenario) in SCENARIOS {
        debug!("{name}:");
        scenario(store).map_err(|e| e.context(format!("scenario '{name}' failed")))?;
        debug!("{SEPARATOR}");
    }
    Ok(SCENARIOS.len())
}

fn integer(store: &FlatStore) -> Result<()> {
    let input = 6i32;
    let mut output = 10i32;
    store.serialize(BLOB_NAME, &input)?;
    store.deserialize(BLOB_NAME, &mut output)?;

    ensure!(output == input, "expected {input}, got {output}");
    debug!("expected: {input}; got: {output}");
    Ok(())
}

fn float(store: &FlatStore) -> Result<()> {
    let input = -0.543f64;
    let mut output = -345.43f64;
    store.serialize(BLOB_NAME, &input)?;
    store.deserialize(BLOB_NAME, &mut output)?;

    ensure!(output.to_bits() == input.to_bits(), "expected {input}, got {output}");
    debug!("expected: {input}; got: {output}");
    Ok(())
}

fn character(store: &FlatStore) -> Result<()> {
    let input = b'z';
    let mut output = b'?';
    store.serialize(BLOB_NAME, &input)?;
    store.deserialize(BLOB_NAME, &mut output)?;

    ensure!(output == input);
    debug!("expected: {}; got: {}", input as char, output as char);
    Ok(())
}

fn string(store: &FlatStore) -> Result<()> {
    let input = *b"Right Answer\0";
    let mut output = *b"Wrong Answer\0";
    store.serialize(BLOB_NAME, &input)?;
    store.deserialize(BLOB_NAME, &mut output)?;

    ensure!(output == input);
    debug!(
        "expected: {:?}; got: {:?}",
        String::from_utf8_lossy(&input),
        String::from_utf8_lossy(&output)
    );
    Ok(())
}

fn array(store: &FlatStore) -> Result<()> {
    let input: [u64; 8] = [1, 1, 2, 3, 5, 8, 13, 21];
    let mut output = [0u64; 8];
    store.serialize(BLOB_NAME, &input)?;
    store.deserialize(BLOB_NAME, &mut output)?;

    for (expected, got) in input.iter().zip(output.iter()) {
        ensure!(expected == got, "expected {expected}, got {got}");
        debug!("expected: {expected}; got: {got}");
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct Pair {
    i: i32,
    c: u8,
    _pad: [u8; 3],
}

fn plain_struct(store: &FlatStore) -> Result<()> {
    let input = Pair {
        i: 97,
        c: b'a',
        _pad: [0; 3],
    };
    let mut output = Pair {
        i: 98,
        c: b'b',
        _pad: [0; 3],
    };
    store.serialize(BLOB_NAME, &input)?;
    store.deserialize(BLOB_NAME, &mut output)?;

    ensure!(output == input, "expected {input:?}, got {output:?}");
    debug!("expected: {input:?}; got: {output:?}");
    Ok(())
}

fn heap_buffer(store: &FlatStore) -> Result<()> {
    const LEN: usize = 16;

    let mut input = vec![0u8; LEN].into_boxed_slice();
    let mut output = vec![0u8; LEN].into_boxed_slice();
    input[..15].copy_from_slice(b"Right Answer!!!");
    output[..12].copy_from_slice(b"Wrong Answer");

    store.serialize(BLOB_NAME, &*input)?;
    store.deserialize(BLOB_NAME, &mut *output)?;

    ensure!(input == output);
    debug!(
        "expected: {:?}; got: {:?}",
        String::from_utf8_lossy(&input),
        String::from_utf8_lossy(&output)
    );
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct Record {
    i: i32,
    f: f32,
    name: [u8; 32],
}

impl Record {
    fn new(i: i32, f: f32, name: &str) -> Self {
        let mut buf = [0; 32];
        buf[..name.len()].copy_from_slice(name.as_bytes());
        Self { i, f, name: buf }
    }
}

fn struct_array(store: &FlatStore) -> Result<()> {
    let input = [
        Record::new(-1, 0.1, "AAAA"),
        Record::new(0, 3.0, "BBBB"),
        Record::new(7, -77.7, "CCCC"),
    ];
    store.serialize(BLOB_NAME, &input)?;

    let mut output = [Record::new_zeroed(); 3];
    store.deserialize(BLOB_NAME, &mut output)?;

    for (expected, got) in input.iter().zip(output.iter()) {
        ensure!(expected == got, "expected {expected:?}, got {got:?}");
        debug!("expected: {expected:?}\ngot:      {got:?}");
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct Date {
    day: i32,
    month: i32,
    year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct Time {
    hour: i32,
    minute: i32,
    second: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct TimeDate {
    date: Date,
    time: Time,
}

fn nested_struct(store: &FlatStore) -> Result<()> {
    let input = TimeDate {
        date: Date {
            day: 1,
            month: 4,
            year: 2021,
        },
        time: Time {
            hour: 2,
            minute: 39,
            second: 32,
        },
    };
    store.serialize(BLOB_NAME, &input)?;

    let output: TimeDate = store.load(BLOB_NAME)?;

    ensure!(output == input, "expected {input:?}, got {output:?}");
    debug!(
        "expected: {}/{}/{} {}:{}:{}; got: {}/{}/{} {}:{}:{}",
        input.date.day,
        input.date.month,
        input.date.year,
        input.time.hour,
        input.time.minute,
        input.time.second,
        output.date.day,
        output.date.month,
        output.date.year,
        output.time.hour,
        output.time.minute,
        output.time.second
    );
    Ok(())
}

/// A `Vec` itself can't be stored, only its contents. The copy must not alias the input.
fn vec_contents(store: &FlatStore) -> Result<()> {
    let mut input = vec![-5i32, -7, 0, 1, 3, 8, 12, -20, 39, 53];
    store.serialize(BLOB_NAME, input.as_slice())?;

    let mut output = vec![0i32; input.len()];
    store.deserialize(BLOB_NAME, output.as_mut_slice())?;

    let old_value = input[0];
    input[0] = 1;

    for (i, (current, got)) in input.iter().zip(output.iter()).enumerate() {
        let expected = if i == 0 { old_value } else { *current };
        ensure!(expected == *got, "expected {expected}, got {got}");
        debug!("expected: {expected}; got: {got}");
    }
    Ok(())
}
