use super::fake::{Call, Committed, Fake};
use crate::{
    negotiate, Access, Config, Constraint, Deviation, Direction, Errno, Error, Format, Near,
    Negotiator, Parameter, Result,
};

fn error<T>(result: Result<T>) -> Error {
    match result {
        Ok(..) => panic!("expected negotiation to fail"),
        Err(error) => error,
    }
}

#[test]
fn test_negotiate_defaults() {
    let fake = Fake::new();
    let negotiated = negotiate(&fake, "default").unwrap();

    assert_eq!(
        *negotiated.config(),
        Config {
            channels: 1,
            access: Access::ReadWriteNoninterleaved,
            format: Format::FloatLE,
            rate: Near::new(48000, 48000, Direction::Nearest),
            period_size: Near::new(256, 256, Direction::Nearest),
            periods: Near::new(3, 3, Direction::Nearest),
        }
    );

    assert!(negotiated.config().deviations().is_empty());
    assert!(negotiated.pcm().as_raw().is_prepared());
    assert_eq!(negotiated.pcm().name(), "default");

    assert_eq!(
        fake.committed(),
        Some(Committed {
            channels: Some(1),
            access: Some(Access::ReadWriteNoninterleaved),
            rate: Some(48000),
            format: Some(Format::FloatLE),
            period_size: Some(256),
            periods: Some(3),
        })
    );

    assert_eq!(
        fake.calls(),
        vec![
            Call::Open,
            Call::Malloc,
            Call::Any,
            Call::SetChannels(1),
            Call::SetAccess(Access::ReadWriteNoninterleaved),
            Call::SetRateNear(48000),
            Call::SetFormat(Format::FloatLE),
            Call::SetPeriodSizeNear(256),
            Call::SetPeriodsNear(3),
            Call::HwParams,
            Call::Free,
            Call::Prepare,
        ]
    );

    let counts = fake.counts();
    assert_eq!(counts.opened, 1);
    assert_eq!(counts.closed, 0);
    assert_eq!(counts.allocated, 1);
    assert_eq!(counts.freed, 1);

    drop(negotiated);
    assert!(fake.counts().balanced());
    assert_eq!(fake.counts().closed, 1);
}

#[test]
fn test_negotiate_falls_back_to_s32() {
    let fake = Fake::new().supported(&[Format::S16LE, Format::S32LE]);
    let negotiated = negotiate(&fake, "default").unwrap();

    assert_eq!(negotiated.config().format, Format::S32LE);
    assert_eq!(fake.committed().and_then(|c| c.format), Some(Format::S32LE));

    let attempts = fake
        .calls()
        .into_iter()
        .filter(|call| matches!(call, Call::SetFormat(..)))
        .collect::<Vec<_>>();

    assert_eq!(
        attempts,
        vec![
            Call::SetFormat(Format::FloatLE),
            Call::SetFormat(Format::S32LE)
        ]
    );
}

#[test]
fn test_negotiate_falls_back_on_any_float_error() {
    let fake = Fake::new().fail_on(Call::SetFormat(Format::FloatLE), Errno::EBUSY);
    let negotiated = negotiate(&fake, "default").unwrap();
    assert_eq!(negotiated.config().format, Format::S32LE);
}

#[test]
fn test_negotiate_no_supported_format() {
    let fake = Fake::new().supported(&[Format::S16LE, Format::U8]);

    match error(negotiate(&fake, "default")) {
        Error::NoSupportedFormat { candidates, source } => {
            assert_eq!(&*candidates, &[Format::FloatLE, Format::S32LE]);
            assert_eq!(source, Errno::EINVAL);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let counts = fake.counts();
    assert_eq!(counts.opened, 1);
    assert_eq!(counts.allocated, 1);
    assert!(counts.balanced());
    assert!(fake.position(Call::Free) < fake.position(Call::Close));
    assert_eq!(fake.position(Call::SetPeriodSizeNear(256)), None);
    assert_eq!(fake.position(Call::HwParams), None);
    assert_eq!(fake.committed(), None);
}

#[test]
fn test_negotiate_no_supported_format_keeps_last_error() {
    let fake = Fake::new()
        .fail_on(Call::SetFormat(Format::FloatLE), Errno::EINVAL)
        .fail_on(Call::SetFormat(Format::S32LE), Errno::EBUSY);

    let error = error(negotiate(&fake, "default"));
    assert_eq!(error.errno(), Errno::EBUSY);
    assert!(error
        .to_string()
        .starts_with("cannot set sample format, tried FLOAT_LE, S32_LE: "));
}

#[test]
fn test_negotiate_nearest_rate() {
    let fake = Fake::new().rate(8000, 44100);
    let negotiated = negotiate(&fake, "default").unwrap();
    let config = negotiated.config();

    assert_eq!(config.rate, Near::new(48000, 44100, Direction::Smaller));
    assert!(config.rate.deviates());
    assert_eq!(config.rate.to_string(), "44100 (requested 48000)");

    let deviations = config.deviations();

    assert_eq!(
        deviations,
        vec![Deviation {
            parameter: Parameter::Rate,
            requested: 48000,
            actual: 44100,
        }]
    );

    assert_eq!(
        deviations[0].to_string(),
        "sample rate 48000 is not supported, using 44100"
    );

    assert_eq!(fake.committed().and_then(|c| c.rate), Some(44100));
}

#[test]
fn test_negotiate_nearest_period_size_and_periods() {
    let fake = Fake::new().period_size(512, 8192).periods(4, 8);
    let negotiated = negotiate(&fake, "default").unwrap();
    let config = negotiated.config();

    assert_eq!(config.period_size, Near::new(256, 512, Direction::Greater));
    assert_eq!(config.periods, Near::new(3, 4, Direction::Greater));

    let parameters = config
        .deviations()
        .into_iter()
        .map(|d| d.parameter)
        .collect::<Vec<_>>();

    assert_eq!(parameters, vec![Parameter::PeriodSize, Parameter::Periods]);
}

#[test]
fn test_negotiate_open_failure() {
    let fake = Fake::new().missing("hw:1,0");

    match error(negotiate(&fake, "hw:1,0")) {
        Error::Open { device, source } => {
            assert_eq!(&*device, "hw:1,0");
            assert_eq!(source, Errno::ENOENT);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    assert_eq!(fake.calls(), vec![Call::Open]);
    assert_eq!(fake.counts().opened, 0);
    assert_eq!(fake.counts().closed, 0);
}

#[test]
fn test_negotiate_failure_at_every_step() {
    let steps = [
        Call::Malloc,
        Call::Any,
        Call::SetChannels(1),
        Call::SetAccess(Access::ReadWriteNoninterleaved),
        Call::SetRateNear(48000),
        Call::SetPeriodSizeNear(256),
        Call::SetPeriodsNear(3),
        Call::HwParams,
    ];

    for step in steps {
        let fake = Fake::new().fail_on(step, Errno::EIO);
        let error = error(negotiate(&fake, "default"));

        let expected = match step {
            Call::Malloc => matches!(error, Error::Allocate(..)),
            Call::Any => matches!(error, Error::Initialize(..)),
            Call::SetChannels(..) => matches!(
                error,
                Error::Rejected {
                    constraint: Constraint::Channels(1),
                    ..
                }
            ),
            Call::SetAccess(..) => matches!(
                error,
                Error::Rejected {
                    constraint: Constraint::Access(Access::ReadWriteNoninterleaved),
                    ..
                }
            ),
            Call::SetRateNear(..) => matches!(
                error,
                Error::Rejected {
                    constraint: Constraint::Rate(48000),
                    ..
                }
            ),
            Call::SetPeriodSizeNear(..) => matches!(
                error,
                Error::Rejected {
                    constraint: Constraint::PeriodSize(256),
                    ..
                }
            ),
            Call::SetPeriodsNear(..) => matches!(
                error,
                Error::Rejected {
                    constraint: Constraint::Periods(3),
                    ..
                }
            ),
            Call::HwParams => matches!(error, Error::Commit(..)),
            _ => unreachable!(),
        };

        assert!(expected, "{:?}: unexpected error {:?}", step, error);
        assert_eq!(error.errno(), Errno::EIO, "{:?}", step);

        let counts = fake.counts();
        assert_eq!(counts.opened, 1, "{:?}", step);
        assert!(counts.balanced(), "{:?}: {:?}", step, counts);

        if counts.allocated > 0 {
            assert!(
                fake.position(Call::Free) < fake.position(Call::Close),
                "{:?}: parameters freed after close",
                step
            );
        }

        let calls = fake.calls();
        assert_eq!(calls.last(), Some(&Call::Close), "{:?}", step);
        assert_eq!(fake.position(Call::Prepare), None, "{:?}", step);
        assert_eq!(fake.committed(), None, "{:?}", step);
    }
}

#[test]
fn test_negotiate_prepare_failure() {
    let fake = Fake::new().fail_on(Call::Prepare, Errno::EIO);

    let error = error(negotiate(&fake, "default"));
    assert!(matches!(error, Error::Prepare(Errno::EIO)));

    assert!(fake.committed().is_some());
    assert!(fake.counts().balanced());

    assert_eq!(
        &fake.calls()[fake.calls().len() - 4..],
        &[Call::HwParams, Call::Free, Call::Prepare, Call::Close]
    );
}

#[test]
fn test_negotiate_exit_code() {
    let fake = Fake::new().supported(&[Format::U8]);
    let err = error(negotiate(&fake, "default"));
    assert_eq!(err.exit_code(), -libc::EINVAL);

    let fake = Fake::new().fail_on(Call::Prepare, Errno::EBUSY);
    let err = error(negotiate(&fake, "default"));
    assert_eq!(err.exit_code(), -libc::EBUSY);
}

#[test]
fn test_negotiated_prepare_again() {
    let fake = Fake::new();
    let mut negotiated = negotiate(&fake, "default").unwrap();

    negotiated.pcm_mut().prepare().unwrap();
    assert!(negotiated.pcm().as_raw().is_prepared());

    let prepares = fake
        .calls()
        .into_iter()
        .filter(|call| *call == Call::Prepare)
        .count();

    assert_eq!(prepares, 2);
}

#[test]
fn test_negotiate_rejected_channels() {
    let fake = Fake::new().channels(2, 2);

    let error = error(negotiate(&fake, "default"));
    assert!(matches!(
        error,
        Error::Rejected {
            constraint: Constraint::Channels(1),
            source: Errno::EINVAL
        }
    ));
    assert!(error.to_string().starts_with("cannot set channel count to 1: "));
    assert!(fake.counts().balanced());
}

#[test]
fn test_negotiator_overrides() {
    let fake = Fake::new().channels(1, 8);

    let negotiated = Negotiator::new(&fake)
        .channels(2)
        .access(Access::ReadWriteInterleaved)
        .rate(96000)
        .period_size(1024)
        .periods(4)
        .open("hw:0,0")
        .unwrap();

    let config = *negotiated.config();
    assert_eq!(config.channels, 2);
    assert_eq!(config.access, Access::ReadWriteInterleaved);
    assert_eq!(config.rate.actual, 96000);
    assert_eq!(config.period_size.actual, 1024);
    assert_eq!(config.periods.actual, 4);
    assert!(config.deviations().is_empty());

    assert_eq!(
        fake.committed(),
        Some(Committed {
            channels: Some(2),
            access: Some(Access::ReadWriteInterleaved),
            rate: Some(96000),
            format: Some(Format::FloatLE),
            period_size: Some(1024),
            periods: Some(4),
        })
    );
}

#[test]
fn test_negotiated_into_parts() {
    let fake = Fake::new();
    let (pcm, config) = negotiate(&fake, "default").unwrap().into_parts();

    assert_eq!(config.format, Format::FloatLE);
    assert_eq!(fake.counts().closed, 0);

    pcm.close();
    assert_eq!(fake.counts().closed, 1);
    assert!(fake.counts().balanced());
}

#[test]
fn test_negotiate_repeatedly() {
    let fake = Fake::new();

    for n in 1..=3 {
        let negotiated = negotiate(&fake, "default").unwrap();
        drop(negotiated);

        let counts = fake.counts();
        assert_eq!(counts.opened, n);
        assert!(counts.balanced());
    }
}
