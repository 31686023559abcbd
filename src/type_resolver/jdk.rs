//! Standard-library layer of the type resolver.
//!
//! Java sources are analyzed without a JDK on hand, so the standard library is described by
//! a fixed table. It lists the public types of `java.lang` and `java.util` and the commonly
//! used types of `java.util.*`, `java.time`, `java.io`, `java.net`, `java.nio`,
//! `java.security`, `java.sql` and `java.text`.
//!
//! The table is not the whole JDK. A type outside it, such as anything from `javax.*` or a
//! rarely used `java.*` package, is left to the next layer and usually ends up as its
//! declared text.

use super::{SolvedType, TypeOrigin, TypeSolver};
use std::collections::HashSet;

const JDK_TYPES: &[&str] = &[
    // java.lang
    "java.lang.Appendable",
    "java.lang.ArithmeticException",
    "java.lang.ArrayIndexOutOfBoundsException",
    "java.lang.ArrayStoreException",
    "java.lang.AssertionError",
    "java.lang.AutoCloseable",
    "java.lang.Boolean",
    "java.lang.BootstrapMethodError",
    "java.lang.Byte",
    "java.lang.CharSequence",
    "java.lang.Character",
    "java.lang.Character.Subset",
    "java.lang.Character.UnicodeBlock",
    "java.lang.Character.UnicodeScript",
    "java.lang.Class",
    "java.lang.ClassCastException",
    "java.lang.ClassCircularityError",
    "java.lang.ClassFormatError",
    "java.lang.ClassLoader",
    "java.lang.ClassNotFoundException",
    "java.lang.ClassValue",
    "java.lang.CloneNotSupportedException",
    "java.lang.Cloneable",
    "java.lang.Comparable",
    "java.lang.Deprecated",
    "java.lang.Double",
    "java.lang.Enum",
    "java.lang.EnumConstantNotPresentException",
    "java.lang.Error",
    "java.lang.Exception",
    "java.lang.ExceptionInInitializerError",
    "java.lang.Float",
    "java.lang.FunctionalInterface",
    "java.lang.IllegalAccessError",
    "java.lang.IllegalAccessException",
    "java.lang.IllegalArgumentException",
    "java.lang.IllegalCallerException",
    "java.lang.IllegalMonitorStateException",
    "java.lang.IllegalStateException",
    "java.lang.IllegalThreadStateException",
    "java.lang.IncompatibleClassChangeError",
    "java.lang.IndexOutOfBoundsException",
    "java.lang.InheritableThreadLocal",
    "java.lang.InstantiationError",
    "java.lang.InstantiationException",
    "java.lang.Integer",
    "java.lang.InternalError",
    "java.lang.InterruptedException",
    "java.lang.Iterable",
    "java.lang.LayerInstantiationException",
    "java.lang.LinkageError",
    "java.lang.Long",
    "java.lang.Math",
    "java.lang.Module",
    "java.lang.ModuleLayer",
    "java.lang.NegativeArraySizeException",
    "java.lang.NoClassDefFoundError",
    "java.lang.NoSuchFieldError",
    "java.lang.NoSuchFieldException",
    "java.lang.NoSuchMethodError",
    "java.lang.NoSuchMethodException",
    "java.lang.NullPointerException",
    "java.lang.Number",
    "java.lang.NumberFormatException",
    "java.lang.Object",
    "java.lang.OutOfMemoryError",
    "java.lang.Override",
    "java.lang.Package",
    "java.lang.Process",
    "java.lang.ProcessBuilder",
    "java.lang.ProcessBuilder.Redirect",
    "java.lang.ProcessHandle",
    "java.lang.Readable",
    "java.lang.Record",
    "java.lang.ReflectiveOperationException",
    "java.lang.Runnable",
    "java.lang.Runtime",
    "java.lang.Runtime.Version",
    "java.lang.RuntimeException",
    "java.lang.SafeVarargs",
    "java.lang.SecurityException",
    "java.lang.SecurityManager",
    "java.lang.Short",
    "java.lang.StackOverflowError",
    "java.lang.StackTraceElement",
    "java.lang.StackWalker",
    "java.lang.StackWalker.StackFrame",
    "java.lang.StrictMath",
    "java.lang.String",
    "java.lang.StringBuffer",
    "java.lang.StringBuilder",
    "java.lang.StringIndexOutOfBoundsException",
    "java.lang.SuppressWarnings",
    "java.lang.System",
    "java.lang.System.Logger",
    "java.lang.Thread",
    "java.lang.Thread.State",
    "java.lang.Thread.UncaughtExceptionHandler",
    "java.lang.ThreadDeath",
    "java.lang.ThreadGroup",
    "java.lang.ThreadLocal",
    "java.lang.Throwable",
    "java.lang.TypeNotPresentException",
    "java.lang.UnknownError",
    "java.lang.UnsatisfiedLinkError",
    "java.lang.UnsupportedClassVersionError",
    "java.lang.UnsupportedOperationException",
    "java.lang.VerifyError",
    "java.lang.VirtualMachineError",
    "java.lang.Void",
    // java.util
    "java.util.AbstractCollection",
    "java.util.AbstractList",
    "java.util.AbstractMap",
    "java.util.AbstractMap.SimpleEntry",
    "java.util.AbstractMap.SimpleImmutableEntry",
    "java.util.AbstractQueue",
    "java.util.AbstractSequentialList",
    "java.util.AbstractSet",
    "java.util.ArrayDeque",
    "java.util.ArrayList",
    "java.util.Arrays",
    "java.util.Base64",
    "java.util.Base64.Decoder",
    "java.util.Base64.Encoder",
    "java.util.BitSet",
    "java.util.Calendar",
    "java.util.Collection",
    "java.util.Collections",
    "java.util.Comparator",
    "java.util.ConcurrentModificationException",
    "java.util.Currency",
    "java.util.Date",
    "java.util.Deque",
    "java.util.Dictionary",
    "java.util.DoubleSummaryStatistics",
    "java.util.EmptyStackException",
    "java.util.EnumMap",
    "java.util.EnumSet",
    "java.util.Enumeration",
    "java.util.EventListener",
    "java.util.EventObject",
    "java.util.Formattable",
    "java.util.Formatter",
    "java.util.FormatterClosedException",
    "java.util.GregorianCalendar",
    "java.util.HashMap",
    "java.util.HashSet",
    "java.util.Hashtable",
    "java.util.HexFormat",
    "java.util.IdentityHashMap",
    "java.util.IllegalFormatException",
    "java.util.InputMismatchException",
    "java.util.IntSummaryStatistics",
    "java.util.Iterator",
    "java.util.LinkedHashMap",
    "java.util.LinkedHashSet",
    "java.util.LinkedList",
    "java.util.List",
    "java.util.ListIterator",
    "java.util.ListResourceBundle",
    "java.util.Locale",
    "java.util.Locale.Builder",
    "java.util.Locale.Category",
    "java.util.Locale.LanguageRange",
    "java.util.LongSummaryStatistics",
    "java.util.Map",
    "java.util.Map.Entry",
    "java.util.MissingResourceException",
    "java.util.NavigableMap",
    "java.util.NavigableSet",
    "java.util.NoSuchElementException",
    "java.util.Objects",
    "java.util.Observable",
    "java.util.Observer",
    "java.util.Optional",
    "java.util.OptionalDouble",
    "java.util.OptionalInt",
    "java.util.OptionalLong",
    "java.util.PrimitiveIterator",
    "java.util.PriorityQueue",
    "java.util.Properties",
    "java.util.PropertyResourceBundle",
    "java.util.Queue",
    "java.util.Random",
    "java.util.RandomAccess",
    "java.util.ResourceBundle",
    "java.util.Scanner",
    "java.util.ServiceLoader",
    "java.util.Set",
    "java.util.SimpleTimeZone",
    "java.util.SortedMap",
    "java.util.SortedSet",
    "java.util.Spliterator",
    "java.util.Spliterators",
    "java.util.SplittableRandom",
    "java.util.Stack",
    "java.util.StringJoiner",
    "java.util.StringTokenizer",
    "java.util.TimeZone",
    "java.util.Timer",
    "java.util.TimerTask",
    "java.util.TooManyListenersException",
    "java.util.TreeMap",
    "java.util.TreeSet",
    "java.util.UUID",
    "java.util.Vector",
    "java.util.WeakHashMap",
    // java.util.concurrent
    "java.util.concurrent.ArrayBlockingQueue",
    "java.util.concurrent.BlockingDeque",
    "java.util.concurrent.BlockingQueue",
    "java.util.concurrent.Callable",
    "java.util.concurrent.CancellationException",
    "java.util.concurrent.CompletableFuture",
    "java.util.concurrent.CompletionException",
    "java.util.concurrent.CompletionStage",
    "java.util.concurrent.ConcurrentHashMap",
    "java.util.concurrent.ConcurrentLinkedDeque",
    "java.util.concurrent.ConcurrentLinkedQueue",
    "java.util.concurrent.ConcurrentMap",
    "java.util.concurrent.ConcurrentSkipListMap",
    "java.util.concurrent.CopyOnWriteArrayList",
    "java.util.concurrent.CopyOnWriteArraySet",
    "java.util.concurrent.CountDownLatch",
    "java.util.concurrent.CyclicBarrier",
    "java.util.concurrent.DelayQueue",
    "java.util.concurrent.ExecutionException",
    "java.util.concurrent.Executor",
    "java.util.concurrent.ExecutorService",
    "java.util.concurrent.Executors",
    "java.util.concurrent.Flow",
    "java.util.concurrent.Flow.Publisher",
    "java.util.concurrent.Flow.Subscriber",
    "java.util.concurrent.ForkJoinPool",
    "java.util.concurrent.Future",
    "java.util.concurrent.LinkedBlockingDeque",
    "java.util.concurrent.LinkedBlockingQueue",
    "java.util.concurrent.PriorityBlockingQueue",
    "java.util.concurrent.ScheduledExecutorService",
    "java.util.concurrent.ScheduledFuture",
    "java.util.concurrent.Semaphore",
    "java.util.concurrent.ThreadLocalRandom",
    "java.util.concurrent.ThreadPoolExecutor",
    "java.util.concurrent.TimeUnit",
    "java.util.concurrent.TimeoutException",
    // java.util.concurrent.atomic
    "java.util.concurrent.atomic.AtomicBoolean",
    "java.util.concurrent.atomic.AtomicInteger",
    "java.util.concurrent.atomic.AtomicLong",
    "java.util.concurrent.atomic.AtomicReference",
    "java.util.concurrent.atomic.LongAdder",
    // java.util.concurrent.locks
    "java.util.concurrent.locks.Lock",
    "java.util.concurrent.locks.ReadWriteLock",
    "java.util.concurrent.locks.ReentrantLock",
    "java.util.concurrent.locks.ReentrantReadWriteLock",
    // java.util.function
    "java.util.function.BiConsumer",
    "java.util.function.BiFunction",
    "java.util.function.BiPredicate",
    "java.util.function.BinaryOperator",
    "java.util.function.BooleanSupplier",
    "java.util.function.Consumer",
    "java.util.function.DoubleFunction",
    "java.util.function.Function",
    "java.util.function.IntFunction",
    "java.util.function.IntPredicate",
    "java.util.function.IntSupplier",
    "java.util.function.LongFunction",
    "java.util.function.Predicate",
    "java.util.function.Supplier",
    "java.util.function.ToIntFunction",
    "java.util.function.ToLongFunction",
    "java.util.function.UnaryOperator",
    // java.util.regex
    "java.util.regex.Matcher",
    "java.util.regex.Pattern",
    "java.util.regex.PatternSyntaxException",
    // java.util.stream
    "java.util.stream.Collector",
    "java.util.stream.Collectors",
    "java.util.stream.DoubleStream",
    "java.util.stream.IntStream",
    "java.util.stream.LongStream",
    "java.util.stream.Stream",
    // java.time
    "java.time.Clock",
    "java.time.DayOfWeek",
    "java.time.Duration",
    "java.time.Instant",
    "java.time.LocalDate",
    "java.time.LocalDateTime",
    "java.time.LocalTime",
    "java.time.Month",
    "java.time.MonthDay",
    "java.time.OffsetDateTime",
    "java.time.OffsetTime",
    "java.time.Period",
    "java.time.Year",
    "java.time.YearMonth",
    "java.time.ZoneId",
    "java.time.ZoneOffset",
    "java.time.ZonedDateTime",
    // java.time.format
    "java.time.format.DateTimeFormatter",
    // java.time.temporal
    "java.time.temporal.ChronoUnit",
    // java.math
    "java.math.BigDecimal",
    "java.math.BigInteger",
    "java.math.RoundingMode",
    // java.io
    "java.io.BufferedInputStream",
    "java.io.BufferedOutputStream",
    "java.io.BufferedReader",
    "java.io.BufferedWriter",
    "java.io.ByteArrayInputStream",
    "java.io.ByteArrayOutputStream",
    "java.io.Closeable",
    "java.io.EOFException",
    "java.io.File",
    "java.io.FileInputStream",
    "java.io.FileNotFoundException",
    "java.io.FileOutputStream",
    "java.io.FileReader",
    "java.io.FileWriter",
    "java.io.Flushable",
    "java.io.IOException",
    "java.io.InputStream",
    "java.io.InputStreamReader",
    "java.io.OutputStream",
    "java.io.OutputStreamWriter",
    "java.io.PrintStream",
    "java.io.PrintWriter",
    "java.io.Reader",
    "java.io.Serializable",
    "java.io.StringReader",
    "java.io.StringWriter",
    "java.io.UncheckedIOException",
    "java.io.Writer",
    // java.nio
    "java.nio.ByteBuffer",
    // java.nio.charset
    "java.nio.charset.Charset",
    "java.nio.charset.StandardCharsets",
    // java.nio.file
    "java.nio.file.Files",
    "java.nio.file.Path",
    "java.nio.file.Paths",
    "java.nio.file.StandardOpenOption",
    // java.net
    "java.net.HttpURLConnection",
    "java.net.InetAddress",
    "java.net.MalformedURLException",
    "java.net.URI",
    "java.net.URISyntaxException",
    "java.net.URL",
    "java.net.URLDecoder",
    "java.net.URLEncoder",
    // java.security
    "java.security.GeneralSecurityException",
    "java.security.Key",
    "java.security.KeyPair",
    "java.security.MessageDigest",
    "java.security.NoSuchAlgorithmException",
    "java.security.Principal",
    "java.security.PrivateKey",
    "java.security.PublicKey",
    "java.security.SecureRandom",
    // java.sql
    "java.sql.Date",
    "java.sql.Time",
    "java.sql.Timestamp",
    // java.text
    "java.text.DateFormat",
    "java.text.DecimalFormat",
    "java.text.MessageFormat",
    "java.text.NumberFormat",
    "java.text.ParseException",
    "java.text.SimpleDateFormat",
];

/// Resolves qualified names against the built-in JDK table.
pub struct JdkTypeSolver {
    types: HashSet<&'static str>,
}

impl JdkTypeSolver {
    pub fn new() -> Self {
        Self {
            types: JDK_TYPES.iter().copied().collect(),
        }
    }
}

impl Default for JdkTypeSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeSolver for JdkTypeSolver {
    fn name(&self) -> &str {
        "jdk"
    }

    fn solve_type(&self, qualified_name: &str) -> Option<SolvedType> {
        self.types.contains(qualified_name).then(|| SolvedType {
            qualified_name: qualified_name.to_string(),
            origin: TypeOrigin::StandardLibrary,
        })
    }
}
