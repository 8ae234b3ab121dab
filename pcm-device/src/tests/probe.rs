use super::fake::{Call, Fake};
use crate::{probe, Errno, Error, Format, Query, Range};

#[test]
fn test_probe_supported_formats_in_order() {
    let fake = Fake::new()
        .formats(&[Format::S8, Format::U8, Format::S16LE, Format::S16BE])
        .supported(&[Format::S16LE, Format::S8]);

    let report = probe(&fake, "default").unwrap();
    assert_eq!(report.formats, vec![Format::S8, Format::S16LE]);

    let tested = fake
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::TestFormat(format) => Some(format),
            _ => None,
        })
        .collect::<Vec<_>>();

    assert_eq!(
        tested,
        vec![Format::S8, Format::U8, Format::S16LE, Format::S16BE]
    );
}

#[test]
fn test_probe_ranges() {
    let fake = Fake::new()
        .formats(&[Format::S16LE, Format::S32LE, Format::FloatLE])
        .supported(&[Format::S32LE, Format::FloatLE])
        .channels(1, 8)
        .rate(44100, 96000)
        .period_size(32, 4096)
        .buffer_size(64, 131072);

    let report = probe(&fake, "hw:0,0").unwrap();

    assert_eq!(report.device, "hw:0,0");
    assert_eq!(report.channels, Range { min: 1, max: 8 });
    assert_eq!(
        report.rate,
        Range {
            min: 44100,
            max: 96000
        }
    );
    assert_eq!(report.period_size, Range { min: 32, max: 4096 });
    assert_eq!(
        report.buffer_size,
        Range {
            min: 64,
            max: 131072
        }
    );

    let expected = "\
S32_LE
FLOAT_LE
Channel range: 1 to 8 channels
Sample rate range: 44100 Hz to 96000 Hz
Period size range: 32 to 4096 frames
Buffer size range: 64 to 131072 frames";

    assert_eq!(report.to_string(), expected);
}

#[test]
fn test_probe_releases_everything() {
    let fake = Fake::new();
    probe(&fake, "default").unwrap();

    let counts = fake.counts();
    assert_eq!(counts.opened, 1);
    assert_eq!(counts.allocated, 1);
    assert!(counts.balanced());
    assert!(fake.position(Call::Free) < fake.position(Call::Close));
}

#[test]
fn test_probe_does_not_configure() {
    let fake = Fake::new();
    probe(&fake, "default").unwrap();

    assert_eq!(fake.committed(), None);

    for call in fake.calls() {
        assert!(
            !matches!(
                call,
                Call::SetChannels(..)
                    | Call::SetAccess(..)
                    | Call::SetRateNear(..)
                    | Call::SetFormat(..)
                    | Call::SetPeriodSizeNear(..)
                    | Call::SetPeriodsNear(..)
                    | Call::HwParams
                    | Call::Prepare
            ),
            "{:?} called while probing",
            call
        );
    }
}

#[test]
fn test_probe_open_failure() {
    let fake = Fake::new().missing("hw:9,9");

    match probe(&fake, "hw:9,9") {
        Err(Error::Open { device, source }) => {
            assert_eq!(&*device, "hw:9,9");
            assert_eq!(source, Errno::ENOENT);
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }

    assert_eq!(fake.counts().opened, 0);
    assert!(fake.counts().balanced());
    assert_eq!(fake.calls(), vec![Call::Open]);
}

#[test]
fn test_probe_exit_code() {
    let fake = Fake::new().missing("hw:9,9");
    let error = probe(&fake, "hw:9,9").unwrap_err();
    assert_eq!(error.exit_code(), -libc::ENOENT);

    let fake = Fake::new().fail_on(Call::BufferSizeMax, Errno::EIO);
    let error = probe(&fake, "default").unwrap_err();
    assert_eq!(error.exit_code(), -libc::EIO);
}

#[test]
fn test_probe_query_failure() {
    let fake = Fake::new().fail_on(Call::RateMax, Errno::EIO);

    match probe(&fake, "default") {
        Err(Error::Query { query, source }) => {
            assert_eq!(query, Query::RateMax);
            assert_eq!(source, Errno::EIO);
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }

    let counts = fake.counts();
    assert_eq!(counts.opened, 1);
    assert!(counts.balanced());
    assert!(fake.position(Call::Free) < fake.position(Call::Close));
    assert_eq!(fake.position(Call::PeriodSizeMin), None);
}

#[test]
fn test_probe_allocation_failure() {
    let fake = Fake::new().fail_on(Call::Malloc, Errno::EBUSY);

    let error = probe(&fake, "default").unwrap_err();
    assert!(matches!(error, Error::Allocate(Errno::EBUSY)));
    assert_eq!(error.errno(), Errno::EBUSY);

    let counts = fake.counts();
    assert_eq!(counts.allocated, 0);
    assert_eq!(counts.freed, 0);
    assert_eq!(counts.closed, 1);
}

#[test]
fn test_probe_initialize_failure() {
    let fake = Fake::new().fail_on(Call::Any, Errno::EINVAL);

    let error = probe(&fake, "default").unwrap_err();
    assert!(matches!(error, Error::Initialize(Errno::EINVAL)));

    let counts = fake.counts();
    assert_eq!(counts.allocated, 1);
    assert!(counts.balanced());
    assert_eq!(
        fake.calls(),
        vec![Call::Open, Call::Malloc, Call::Any, Call::Free, Call::Close]
    );
}

#[test]
fn test_probe_twice() {
    let fake = Fake::new();

    let first = probe(&fake, "default").unwrap();
    let first_counts = fake.counts();
    let first_calls = fake.calls();

    let second = probe(&fake, "default").unwrap();
    let second_counts = fake.counts();
    let second_calls = fake.calls();

    assert_eq!(first, second);
    assert_eq!(first_counts.opened, 1);
    assert_eq!(first_counts.closed, 1);
    assert_eq!(second_counts.opened, 2);
    assert_eq!(second_counts.closed, 2);
    assert!(second_counts.balanced());
    assert_eq!(&second_calls[first_calls.len()..], &first_calls[..]);
}
