//! Boot Stack Tests
//!
//! The start API and the trampoline must agree on every core's stack. These
//! tests pin down the `base + size * cpu (+ size)` arithmetic.

#[cfg(test)]
mod tests {
    use crate::smp::{BootStacks, CpuStack};

    const SIZE: usize = 1024;

    #[test]
    fn test_region_arithmetic() {
        let stacks: Box<BootStacks<4, SIZE>> = Box::new(BootStacks::new());
        let base = stacks.base();

        for cpu in 0..4 {
            let region = stacks.region(cpu).unwrap();
            assert_eq!(region, CpuStack::new(base + SIZE * cpu, SIZE));
            assert_eq!(stacks.top(cpu), Some(base + SIZE * cpu + SIZE));
        }
    }

    #[test]
    fn test_region_out_of_range() {
        let stacks: Box<BootStacks<4, SIZE>> = Box::new(BootStacks::new());
        assert!(stacks.region(4).is_none());
        assert!(stacks.top(usize::MAX).is_none());
    }

    #[test]
    fn test_regions_are_adjacent_and_disjoint() {
        let stacks: Box<BootStacks<4, SIZE>> = Box::new(BootStacks::new());
        for cpu in 0..3 {
            let this = stacks.region(cpu).unwrap();
            let next = stacks.region(cpu + 1).unwrap();
            assert_eq!(this.top(), next.base);
        }
    }

    #[test]
    fn test_stack_alignment() {
        let stacks: Box<BootStacks<2, SIZE>> = Box::new(BootStacks::new());
        assert_eq!(stacks.base() % 16, 0);
        assert_eq!(stacks.top(1).unwrap() % 16, 0);
    }

    #[test]
    fn test_geometry() {
        let stacks: Box<BootStacks<3, SIZE>> = Box::new(BootStacks::new());
        assert_eq!(stacks.count(), 3);
        assert_eq!(stacks.stack_size(), SIZE);
    }
}
