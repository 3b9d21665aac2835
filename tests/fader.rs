mod tests {
    use embassy_time::{Delay, Duration};
    use embedded_hal::delay::DelayNs;
    use pca9685_fader::{
        BrightnessCurve, ChannelMask, FadeConfig, FadeError, Fader, InvalidArgument,
        MemoryError, MemoryRegisters, RegisterBlock, RegisterPair, Tick, register::dark_block,
    };

    /// Records pauses instead of sleeping
    #[derive(Debug, Default)]
    struct CountingDelay {
        pauses: usize,
        total_us: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.pauses += 1;
            self.total_us += u64::from(ns) / 1000;
        }

        fn delay_us(&mut self, us: u32) {
            self.pauses += 1;
            self.total_us += u64::from(us);
        }
    }

    fn tick(value: u16) -> Tick {
        Tick::new(value).unwrap()
    }

    /// Channels 0 and 2 at 100 and 4000, channel 1 with a non-zero ON tick
    fn scenario_block() -> RegisterBlock {
        let mut block = dark_block();
        block[0] = RegisterPair::off_only(tick(100));
        block[1] = RegisterPair::new(tick(5), tick(777));
        block[2] = RegisterPair::off_only(tick(4000));
        block
    }

    fn fader(
        registers: MemoryRegisters<8>,
        step: u16,
    ) -> Fader<MemoryRegisters<8>, CountingDelay> {
        let config = FadeConfig {
            step,
            ..FadeConfig::default()
        };
        Fader::new(registers, CountingDelay::default(), config)
    }

    #[test]
    fn test_fade_scenario() {
        let initial = scenario_block();
        let mut fader = fader(MemoryRegisters::new(initial), 500);

        let writes = fader.fade_to_tick(ChannelMask::new(0b101), tick(2000));
        assert_eq!(writes, Ok(4));

        let registers = fader.driver();
        assert_eq!(registers.reads(), 1);
        assert_eq!(registers.writes(), 4);

        let history: Vec<(u16, u16)> = registers
            .history()
            .map(|block| (block[0].off.get(), block[2].off.get()))
            .collect();
        assert_eq!(
            history,
            [(600, 3500), (1100, 3000), (1600, 2500), (2000, 2000)]
        );
        for block in registers.history() {
            assert_eq!(block[1], initial[1]);
            assert_eq!(block[3..], initial[3..]);
        }
    }

    #[test]
    fn test_fade_brightness_uses_configured_curve() {
        let config = FadeConfig {
            step: 4095,
            curve: BrightnessCurve::Linear,
            ..FadeConfig::default()
        };
        let mut fader = Fader::new(MemoryRegisters::<2>::dark(), CountingDelay::default(), config);

        assert_eq!(fader.fade(ChannelMask::single(4).unwrap(), 100.0), Ok(1));
        assert_eq!(fader.read_channel(4).unwrap().off, Tick::MAX);
        assert_eq!(fader.read_channel(5).unwrap().off, Tick::MIN);

        fader.set_config(FadeConfig {
            curve: BrightnessCurve::Perceptual,
            ..*fader.config()
        });
        assert_eq!(fader.fade(ChannelMask::single(4).unwrap(), 1.0), Ok(1));
        assert_eq!(fader.read_channel(4).unwrap().off, tick(9));
    }

    #[test]
    fn test_zero_step_fails_before_touching_the_device() {
        let mut fader = fader(MemoryRegisters::new(scenario_block()), 0);

        let result = fader.fade_to_tick(ChannelMask::ALL, tick(2000));
        assert_eq!(result, Err(FadeError::InvalidArgument(InvalidArgument::ZeroStep)));
        assert_eq!(fader.driver().reads(), 0);
        assert_eq!(fader.driver().writes(), 0);
    }

    #[test]
    fn test_invalid_brightness_fails_before_touching_the_device() {
        let mut fader = fader(MemoryRegisters::dark(), 1);

        assert_eq!(
            fader.fade(ChannelMask::ALL, 101.0),
            Err(FadeError::InvalidArgument(InvalidArgument::BrightnessOutOfRange))
        );
        assert_eq!(
            fader.set_brightness(ChannelMask::ALL, f32::NAN),
            Err(FadeError::InvalidArgument(InvalidArgument::BrightnessOutOfRange))
        );
        assert_eq!(fader.driver().reads(), 0);
        assert_eq!(fader.driver().writes(), 0);
    }

    #[test]
    fn test_empty_selection_returns_immediately() {
        let mut fader = fader(MemoryRegisters::new(scenario_block()), 1);

        assert_eq!(fader.fade_to_tick(ChannelMask::NONE, tick(2000)), Ok(0));
        assert_eq!(fader.set_duty_cycle(ChannelMask::NONE, tick(2000)), Ok(()));
        assert_eq!(fader.driver().reads(), 0);
        assert_eq!(fader.driver().writes(), 0);
    }

    #[test]
    fn test_failed_write_aborts_the_fade() {
        let registers = MemoryRegisters::new(scenario_block()).with_failing_write(2);
        let mut fader = fader(registers, 500);

        let result = fader.fade_to_tick(ChannelMask::new(0b101), tick(2000));
        assert_eq!(result, Err(FadeError::Io(MemoryError::WriteRejected)));

        let registers = fader.driver();
        assert_eq!(registers.writes(), 3);
        // Device keeps the last block that made it through
        assert_eq!(registers.registers()[0].off, tick(1100));
        assert_eq!(registers.registers()[2].off, tick(3000));
    }

    #[test]
    fn test_failed_read_is_propagated() {
        let mut fader = fader(MemoryRegisters::dark().with_failing_reads(), 1);

        assert_eq!(
            fader.fade_to_tick(ChannelMask::ALL, Tick::MAX),
            Err(FadeError::Io(MemoryError::ReadRejected))
        );
        assert_eq!(
            fader.set_duty_cycle(ChannelMask::ALL, Tick::MAX),
            Err(FadeError::Io(MemoryError::ReadRejected))
        );
        assert_eq!(fader.driver().writes(), 0);
    }

    #[test]
    fn test_set_duty_cycle_all_channels() {
        let mut initial = [RegisterPair::new(tick(3), tick(2500)); 16];
        initial[7] = RegisterPair::new(tick(11), tick(4095));
        let mut fader = fader(MemoryRegisters::new(initial), 1);

        assert_eq!(fader.set_duty_cycle(ChannelMask::ALL, Tick::MIN), Ok(()));

        let registers = fader.driver();
        assert_eq!(registers.writes(), 1);
        for (after, before) in registers.registers().iter().zip(initial.iter()) {
            assert_eq!(after.off, Tick::MIN);
            assert_eq!(after.on, before.on);
        }
    }

    #[test]
    fn test_set_brightness_keeps_unselected_channels() {
        let initial = scenario_block();
        let config = FadeConfig {
            curve: BrightnessCurve::Linear,
            ..FadeConfig::default()
        };
        let mut fader = Fader::new(MemoryRegisters::<2>::new(initial), CountingDelay::default(), config);

        assert_eq!(fader.set_brightness(ChannelMask::single(0).unwrap(), 50.0), Ok(()));

        let registers = fader.driver().registers();
        assert_eq!(registers[0].off, tick(2048));
        assert_eq!(registers[1..], initial[1..]);
    }

    #[test]
    fn test_delay_paces_writes() {
        let config = FadeConfig {
            step: 500,
            delay: Duration::from_millis(5),
            curve: BrightnessCurve::Linear,
        };
        let registers = MemoryRegisters::<8>::new(scenario_block());
        let mut fader = Fader::new(registers, CountingDelay::default(), config);

        assert_eq!(fader.fade_to_tick(ChannelMask::new(0b101), tick(2000)), Ok(4));

        let (_, delay) = fader.release();
        // Pauses go between writes only
        assert_eq!(delay.pauses, 3);
        assert_eq!(delay.total_us, 15_000);
    }

    #[test]
    fn test_fade_with_blocking_delay() {
        let config = FadeConfig {
            step: 2048,
            delay: Duration::from_millis(1),
            curve: BrightnessCurve::Linear,
        };
        let mut registers = MemoryRegisters::<4>::dark();
        let mut fader = Fader::new(&mut registers, Delay, config);

        assert_eq!(fader.fade(ChannelMask::ALL, 100.0), Ok(2));
        drop(fader);
        assert!(registers.registers().iter().all(|pair| pair.off == Tick::MAX));
    }

    #[test]
    fn test_read_channel_out_of_range() {
        let mut fader = fader(MemoryRegisters::dark(), 1);
        assert_eq!(
            fader.read_channel(16),
            Err(FadeError::InvalidArgument(InvalidArgument::ChannelSelection))
        );
    }
}
